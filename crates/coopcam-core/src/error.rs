//! COOPCAM 핵심 에러 타입.
//!
//! 분석 사이클의 실패 유형 3종(캡처/분석/파싱)을 구분한다.
//! 셋 모두 루프 최상단에서 동일하게 처리된다 — 로그 후 해당 사이클만 중단.

use thiserror::Error;

/// 코어 레이어 에러.
/// 캡처, 비전 분석, 응답 파싱, 설정 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// OS 레벨 스크린 캡처 실패 (디스플레이 없음, 권한 거부 등)
    #[error("캡처 에러: {0}")]
    Capture(String),

    /// 비전 제공자 호출 실패 (네트워크, API 오류 응답)
    #[error("분석 에러: {0}")]
    Analysis(String),

    /// 모델 응답에서 구조화된 데이터 추출 실패
    #[error("파싱 에러: {0}")]
    Parse(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 네트워크 에러 (클라이언트 생성 실패 등)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_message() {
        let err = CoreError::Capture("디스플레이 없음".to_string());
        assert!(err.to_string().contains("디스플레이 없음"));

        let err = CoreError::Parse("응답에 구조화된 데이터 없음".to_string());
        assert!(err.to_string().contains("파싱"));
    }

    #[test]
    fn serde_error_converts() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{불완전").unwrap_err();
        let err: CoreError = serde_err.into();
        assert!(matches!(err, CoreError::Serialization(_)));
    }
}
