//! # coopcam-core
//!
//! COOPCAM 도메인 공통 계층.
//! 어댑터 crate(vision/network/web)가 공유하는 모델, 포트(trait), 에러, 설정을 정의한다.
//!
//! ## 구조
//! - `error` — 공통 에러 타입 (`CoreError`)
//! - `config` — 애플리케이션 설정 구조체
//! - `config_manager` — 설정 파일 로드/생성 + 환경변수 오버라이드
//! - `models` — 프레임/분석 결과 모델
//! - `ports` — 캡처/분석/발행 포트 (테스트 시 페이크 주입 지점)
//! - `pipeline` — 캡처 → 분석 → 브로드캐스트 1사이클 오케스트레이션

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod ports;
