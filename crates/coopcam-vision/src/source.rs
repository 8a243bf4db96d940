//! `FrameSource` 포트 구현.

use coopcam_core::config::CaptureConfig;
use coopcam_core::error::CoreError;
use coopcam_core::models::frame::EncodedFrame;
use coopcam_core::ports::FrameSource;

use crate::capture::ScreenCapture;
use crate::encoder;

/// 실 화면 프레임 소스 — 캡처 → 크롭 → 다운스케일 → WebP 인코딩
pub struct CoopFrameSource {
    capture: ScreenCapture,
    config: CaptureConfig,
}

impl CoopFrameSource {
    /// 새 프레임 소스 생성
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            capture: ScreenCapture::new(),
            config,
        }
    }
}

impl FrameSource for CoopFrameSource {
    fn grab(&self) -> Result<EncodedFrame, CoreError> {
        let image = self.capture.capture(self.config.region.as_ref())?;
        encoder::encode_frame(&image, self.config.max_edge, self.config.quality)
    }
}
