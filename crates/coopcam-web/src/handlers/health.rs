//! 헬스 체크 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// 헬스 응답 DTO
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 프로세스 상태 (항상 "ok")
    pub status: &'static str,
    /// 현재 연결된 구독자 수
    pub clients: usize,
    /// 분석 루프 주기 (초)
    pub interval: u64,
}

/// 헬스 체크
///
/// GET /api/health — 항상 200.
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        clients: state.hub.count(),
        interval: state.interval_secs,
    })
}
