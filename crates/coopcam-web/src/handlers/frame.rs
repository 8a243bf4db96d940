//! 원본 프레임 조회 핸들러.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use coopcam_core::pipeline;

use crate::error::ApiError;
use crate::AppState;

/// 프레임 응답 DTO
#[derive(Debug, Serialize)]
pub struct FrameResponse {
    /// 인코딩된 프레임 (base64)
    pub image: String,
}

/// 원본 프레임 조회 (운영자 디버깅용)
///
/// GET /api/frame — 캡처만 수행한다. 분석기/허브는 호출하지 않는다.
pub async fn get_frame(State(state): State<AppState>) -> Result<Json<FrameResponse>, ApiError> {
    let frame = pipeline::grab_frame(state.frame_source.clone()).await?;
    Ok(Json(FrameResponse {
        image: frame.base64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;

    #[tokio::test]
    async fn frame_endpoint_returns_base64_without_publish() {
        let state = test_state();
        let (_id, mut rx) = state.hub.add();

        let Json(body) = get_frame(State(state)).await.unwrap();
        assert!(!body.image.is_empty());

        // 캡처 전용 경로 — 브로드캐스트 없음
        assert!(rx.try_recv().is_err());
    }
}
