//! 결과 발행 포트.

use crate::models::analysis::AnalysisResult;

/// 결과 싱크 — 성공한 사이클의 결과를 현재 열린 구독자 전원에게 전달한다.
///
/// 전달 보장 없음: 닫힌 구독자는 에러 없이 건너뛴다.
pub trait ResultSink: Send + Sync {
    /// 결과를 1회 직렬화하여 모든 열린 구독자에게 전송. 전달된 구독자 수 반환.
    fn publish(&self, result: &AnalysisResult) -> usize;
}
