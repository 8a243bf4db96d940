//! 비전 분석기 포트.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::analysis::AnalysisResult;
use crate::models::frame::EncodedFrame;

/// 비전 분석기 — 프레임 1장을 호스팅된 멀티모달 모델로 해석한다.
///
/// 사이클당 정확히 1회 호출. 재시도/백오프/rate limit 없음.
#[async_trait]
pub trait CoopAnalyzer: Send + Sync {
    /// 프레임 + 고정 프롬프트로 모델을 호출하고 응답에서 JSON 오브젝트를 추출한다.
    ///
    /// 실패 유형:
    /// - 네트워크/제공자 오류 → `CoreError::Analysis`
    /// - 응답에 JSON 형태 없음 / 디코딩 실패 → `CoreError::Parse`
    async fn analyze(&self, frame: &EncodedFrame) -> Result<AnalysisResult, CoreError>;
}
