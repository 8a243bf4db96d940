//! # coopcam-vision
//!
//! 프레임 생산 계층 — xcap 스크린 캡처, 영역 크롭, 긴 변 상한 다운스케일,
//! WebP 손실 인코딩 + base64 전송 인코딩.
//!
//! `FrameSource` 포트 구현(`CoopFrameSource`)을 제공한다.

pub mod capture;
pub mod encoder;
pub mod source;

pub use capture::ScreenCapture;
pub use source::CoopFrameSource;
