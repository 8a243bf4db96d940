//! 프레임 소스 포트.

use crate::error::CoreError;
use crate::models::frame::EncodedFrame;

/// 프레임 소스 — 현재 화면(또는 설정된 영역)을 업로드 가능한 프레임으로 만든다.
///
/// 블로킹 호출. 비동기 컨텍스트에서는 `pipeline::grab_frame`이
/// `spawn_blocking`으로 감싼다.
pub trait FrameSource: Send + Sync {
    /// 캡처 + 다운스케일 + 인코딩 수행.
    ///
    /// OS 레벨 캡처 실패 시 `CoreError::Capture`. 재시도하지 않는다.
    fn grab(&self) -> Result<EncodedFrame, CoreError>;
}
