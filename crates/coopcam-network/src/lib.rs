//! # coopcam-network
//!
//! 비전 제공자 네트워크 어댑터.
//! 프레임 1장 + 고정 프롬프트를 OpenAI 호환 엔드포인트로 전송하고
//! 자유 텍스트 응답에서 JSON 오브젝트를 추출한다.

pub mod extract;
pub mod vision_client;

pub use vision_client::RemoteVisionAnalyzer;
