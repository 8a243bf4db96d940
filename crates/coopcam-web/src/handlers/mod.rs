//! API 핸들러 모듈.

pub mod analyze;
pub mod frame;
pub mod health;
pub mod ws;
