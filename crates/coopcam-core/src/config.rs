//! 애플리케이션 설정 구조체.
//!
//! 서버 포트, 분석 주기, 캡처 영역/품질, 비전 제공자 엔드포인트 등
//! 프로세스 전역 설정을 정의한다. 시작 시 한 번 로드되며 런타임 변경은 없다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 스크린 캡처 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 비전 분석기 설정
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            capture: CaptureConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 서버 설정
// ============================================================

/// 웹 서버 설정 — 제어 API + WebSocket + 오버레이 서빙
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 리스닝 포트
    #[serde(default = "default_port")]
    pub port: u16,
    /// 외부 접속 허용 (false: 127.0.0.1 전용)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_external: false,
        }
    }
}

fn default_port() -> u16 {
    3000
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처 영역 — 주 모니터 내 픽셀 사각형. 없으면 전체 화면.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRegion {
    /// 좌상단 x (픽셀)
    pub x: u32,
    /// 좌상단 y (픽셀)
    pub y: u32,
    /// 너비 (픽셀)
    pub width: u32,
    /// 높이 (픽셀)
    pub height: u32,
}

/// 스크린 캡처 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 캡처 영역 (None: 전체 화면)
    #[serde(default)]
    pub region: Option<CaptureRegion>,
    /// 인코딩 후 긴 변 최대 픽셀 (비전 API 입력 한계 대응)
    #[serde(default = "default_max_edge")]
    pub max_edge: u32,
    /// WebP 손실 압축 품질 (0~100)
    #[serde(default = "default_quality")]
    pub quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            region: None,
            max_edge: default_max_edge(),
            quality: default_quality(),
        }
    }
}

fn default_max_edge() -> u32 {
    1280
}

fn default_quality() -> u8 {
    80
}

// ============================================================
// 분석기 설정
// ============================================================

/// 비전 분석기 설정 — 제공자 엔드포인트 + 분석 루프 주기
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// OpenAI 호환 chat completions 엔드포인트
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// 모델 이름
    #[serde(default = "default_model")]
    pub model: String,
    /// API 키 (환경변수 COOPCAM_API_KEY / OPENAI_API_KEY로 오버라이드)
    #[serde(default)]
    pub api_key: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// 분석 루프 주기 (초)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 프로세스 시작 후 첫 사이클까지 지연 (초)
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,
    /// 응답 최대 토큰 수
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AnalyzerConfig {
    /// 분석 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// 시작 지연을 Duration으로 반환
    pub fn startup_delay(&self) -> Duration {
        Duration::from_secs(self.startup_delay_secs)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            interval_secs: default_interval_secs(),
            startup_delay_secs: default_startup_delay_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_interval_secs() -> u64 {
    30
}

fn default_startup_delay_secs() -> u64 {
    3
}

fn default_max_tokens() -> u32 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = AppConfig::default_config();
        assert_eq!(config.server.port, 3000);
        assert!(!config.server.allow_external);
        assert_eq!(config.capture.max_edge, 1280);
        assert_eq!(config.capture.quality, 80);
        assert!(config.capture.region.is_none());
        assert_eq!(config.analyzer.interval_secs, 30);
        assert!(config.analyzer.api_key.is_empty());
    }

    #[test]
    fn partial_json_uses_defaults() {
        // 필드 일부만 있는 설정 파일도 로드 가능해야 함
        let json = r#"{"server": {"port": 8080}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.capture.max_edge, 1280);
        assert_eq!(config.analyzer.model, "gpt-4o-mini");
    }

    #[test]
    fn region_roundtrip() {
        let region = CaptureRegion {
            x: 100,
            y: 50,
            width: 640,
            height: 480,
        };
        let json = serde_json::to_string(&region).unwrap();
        let back: CaptureRegion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, region);
    }

    #[test]
    fn interval_as_duration() {
        let analyzer = AnalyzerConfig {
            interval_secs: 15,
            ..Default::default()
        };
        assert_eq!(analyzer.interval(), Duration::from_secs(15));
    }
}
