//! 도메인 모델.

pub mod analysis;
pub mod frame;

pub use analysis::AnalysisResult;
pub use frame::EncodedFrame;
