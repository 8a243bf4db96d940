//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 헬스 체크
        .route("/health", get(handlers::health::get_health))
        // 수동 분석 트리거
        .route("/analyze", post(handlers::analyze::trigger_analyze))
        // 원본 프레임 조회 (디버깅용)
        .route("/frame", get(handlers::frame::get_frame))
}
