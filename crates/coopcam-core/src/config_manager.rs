//! 설정 파일 관리.
//!
//! 플랫폼별 설정 디렉토리의 JSON 파일에서 설정을 로드한다.
//! 파일이 없으면 기본 설정을 생성해 저장한 뒤 반환한다.
//! 환경변수(API 키, 포트)는 파일 값을 오버라이드한다.

use crate::config::AppConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 파일 이름
const CONFIG_FILE_NAME: &str = "config.json";

/// API 키 환경변수 (우선순위 순)
const API_KEY_ENV_VARS: [&str; 2] = ["COOPCAM_API_KEY", "OPENAI_API_KEY"];

/// 포트 오버라이드 환경변수
const PORT_ENV_VAR: &str = "COOPCAM_PORT";

/// 기본 설정 파일 경로 반환
///
/// - macOS: `~/Library/Application Support/com.coopcam.coopcam/config.json`
/// - Windows: `%APPDATA%\coopcam\coopcam\config\config.json`
/// - Linux: `~/.config/coopcam/config.json` (XDG)
pub fn default_config_path() -> Result<PathBuf, CoreError> {
    ProjectDirs::from("com", "coopcam", "coopcam")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| CoreError::Config("홈 디렉토리를 찾을 수 없음".to_string()))
}

/// 설정 로드 (없으면 기본 설정 생성 후 저장) + 환경변수 오버라이드 적용
pub fn load(path: Option<PathBuf>) -> Result<AppConfig, CoreError> {
    let config_path = match path {
        Some(p) => p,
        None => default_config_path()?,
    };

    let mut config = load_or_create(&config_path)?;
    apply_env_overrides(&mut config);
    Ok(config)
}

/// 파일에서 설정 로드, 파일이 없으면 기본 설정 생성 후 저장
pub fn load_or_create(config_path: &Path) -> Result<AppConfig, CoreError> {
    if config_path.exists() {
        let contents = fs::read_to_string(config_path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", config_path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&contents)
            .map_err(|e| CoreError::Config(format!("설정 파일 파싱 실패: {}", e)))?;
        debug!("설정 로드: {}", config_path.display());
        return Ok(config);
    }

    // 설정 디렉토리 생성
    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                CoreError::Config(format!(
                    "설정 디렉토리 생성 실패: {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let default_config = AppConfig::default_config();
    save_to_file(config_path, &default_config)?;
    info!("기본 설정 파일 생성: {}", config_path.display());
    Ok(default_config)
}

/// 설정을 파일에 저장
pub fn save_to_file(config_path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    let contents = serde_json::to_string_pretty(config)?;
    fs::write(config_path, contents).map_err(|e| {
        CoreError::Config(format!("설정 파일 쓰기 실패: {}: {}", config_path.display(), e))
    })
}

/// 환경변수 오버라이드 적용
///
/// - `COOPCAM_API_KEY` 또는 `OPENAI_API_KEY` → `analyzer.api_key`
/// - `COOPCAM_PORT` → `server.port` (파싱 실패 시 무시)
pub fn apply_env_overrides(config: &mut AppConfig) {
    for var in API_KEY_ENV_VARS {
        if let Ok(key) = std::env::var(var) {
            if !key.is_empty() {
                debug!("API 키 환경변수 적용: {}", var);
                config.analyzer.api_key = key;
                break;
            }
        }
    }

    if let Ok(port) = std::env::var(PORT_ENV_VAR) {
        match port.parse::<u16>() {
            Ok(p) => config.server.port = p,
            Err(_) => tracing::warn!("{} 값이 올바른 포트가 아님: {}", PORT_ENV_VAR, port),
        }
    }
}
