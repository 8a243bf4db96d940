//! 수동 분석 트리거 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use coopcam_core::pipeline;
use coopcam_core::ports::ResultSink;

use crate::error::ApiError;
use crate::AppState;

/// 수동 분석 응답 DTO
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// 사이클 성공 여부
    pub success: bool,
}

/// 수동 분석 트리거
///
/// POST /api/analyze — 타이머와 동일한 캡처→분석→브로드캐스트 시퀀스를
/// 동기적으로 1회 실행한다. 타이머 스케줄에는 영향을 주지 않으며,
/// 타이머 사이클과의 상호 배제도 없다 (관찰된 원 동작 유지).
pub async fn trigger_analyze(
    State(state): State<AppState>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    info!("수동 분석 트리거");

    let sink: Arc<dyn ResultSink> = state.hub.clone();
    pipeline::run_cycle(state.frame_source.clone(), state.analyzer.clone(), sink).await?;

    Ok(Json(AnalyzeResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{failing_state, test_state};
    use serde_json::json;

    #[tokio::test]
    async fn manual_trigger_publishes_to_subscribers() {
        let state = test_state();
        let (_id, mut rx) = state.hub.add();

        let Json(body) = trigger_analyze(State(state)).await.unwrap();
        assert!(body.success);

        let payload = rx.try_recv().unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value, json!({"temperature": 70, "eggCount": 3}));
    }

    #[tokio::test]
    async fn failed_cycle_returns_error_and_publishes_nothing() {
        let state = failing_state();
        let (_id, mut rx) = state.hub.add();

        let err = trigger_analyze(State(state)).await.unwrap_err();
        assert!(err.to_string().contains("분석"));
        assert!(rx.try_recv().is_err());
    }
}
