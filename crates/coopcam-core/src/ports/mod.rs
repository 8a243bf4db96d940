//! 포트 정의 — 어댑터 crate가 구현하는 trait 경계.
//!
//! 구현:
//! - `FrameSource` → `coopcam-vision` (xcap 캡처 + WebP 인코딩)
//! - `CoopAnalyzer` → `coopcam-network` (비전 API 클라이언트)
//! - `ResultSink` → `coopcam-web` (WebSocket 구독자 허브)

pub mod analyzer;
pub mod capture;
pub mod sink;

pub use analyzer::CoopAnalyzer;
pub use capture::FrameSource;
pub use sink::ResultSink;
