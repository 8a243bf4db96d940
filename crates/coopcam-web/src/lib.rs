//! # coopcam-web
//!
//! COOPCAM 웹 계층.
//! Axum 기반 제어 API + WebSocket 구독자 허브 + 오버레이 정적 파일 서빙.
//!
//! ## 엔드포인트
//! - `GET /api/health` — 상태/구독자 수/주기
//! - `POST /api/analyze` — 수동 분석 트리거
//! - `GET /api/frame` — 원본 프레임 조회 (디버깅)
//! - `GET /ws` — 구독자 업그레이드 (서버→클라이언트 푸시 전용)
//! - 그 외 — 임베드된 오버레이 정적 파일

pub mod embedded;
pub mod error;
pub mod handlers;
pub mod hub;
pub mod routes;

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use coopcam_core::config::ServerConfig;
use coopcam_core::ports::{CoopAnalyzer, FrameSource};

pub use hub::SubscriberHub;

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// WebSocket 구독자 허브
    pub hub: Arc<SubscriberHub>,
    /// 프레임 소스 (수동 트리거/프레임 조회용)
    pub frame_source: Arc<dyn FrameSource>,
    /// 비전 분석기 (수동 트리거용)
    pub analyzer: Arc<dyn CoopAnalyzer>,
    /// 분석 루프 주기 (초) — 헬스 응답에 노출
    pub interval_secs: u64,
}

impl AppState {
    /// 새 애플리케이션 상태 생성
    pub fn new(
        hub: Arc<SubscriberHub>,
        frame_source: Arc<dyn FrameSource>,
        analyzer: Arc<dyn CoopAnalyzer>,
        interval_secs: u64,
    ) -> Self {
        Self {
            hub,
            frame_source,
            analyzer,
            interval_secs,
        }
    }
}

/// COOPCAM 웹 서버
pub struct WebServer {
    config: ServerConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(state: AppState, config: ServerConfig) -> Self {
        Self { config, state }
    }

    /// 라우터 구성
    fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .nest("/api", routes::api_routes())
            .route("/ws", get(handlers::ws::ws_upgrade))
            .fallback(embedded::serve_static)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도한다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환한다.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        let app = self.router();

        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{} — {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("COOPCAM 서버 시작: http://{}", addr);

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("웹 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    info!("COOPCAM 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 핸들러 테스트용 페이크 포트 구현.

    use super::*;
    use async_trait::async_trait;
    use coopcam_core::error::CoreError;
    use coopcam_core::models::analysis::AnalysisResult;
    use coopcam_core::models::frame::EncodedFrame;
    use serde_json::json;

    pub struct FakeSource;

    impl FrameSource for FakeSource {
        fn grab(&self) -> Result<EncodedFrame, CoreError> {
            Ok(EncodedFrame {
                data: vec![0xCD; 12],
                base64: "zc3Nzc3Nzc3Nzc3N".to_string(),
                mime: "image/webp".to_string(),
                quality: 80,
                width: 640,
                height: 360,
            })
        }
    }

    pub struct FakeAnalyzer;

    #[async_trait]
    impl CoopAnalyzer for FakeAnalyzer {
        async fn analyze(&self, _frame: &EncodedFrame) -> Result<AnalysisResult, CoreError> {
            Ok(json!({"temperature": 70, "eggCount": 3}))
        }
    }

    pub struct FailingAnalyzer;

    #[async_trait]
    impl CoopAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _frame: &EncodedFrame) -> Result<AnalysisResult, CoreError> {
            Err(CoreError::Analysis("제공자 연결 실패".to_string()))
        }
    }

    /// 성공 경로 상태
    pub fn test_state() -> AppState {
        AppState::new(
            Arc::new(SubscriberHub::new()),
            Arc::new(FakeSource),
            Arc::new(FakeAnalyzer),
            30,
        )
    }

    /// 분석 실패 경로 상태
    pub fn failing_state() -> AppState {
        AppState::new(
            Arc::new(SubscriberHub::new()),
            Arc::new(FakeSource),
            Arc::new(FailingAnalyzer),
            30,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::test_state;

    #[test]
    fn web_server_url() {
        let server = WebServer::new(test_state(), ServerConfig::default());
        assert_eq!(server.url(), "http://localhost:3000");
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn max_port_attempts_is_reasonable() {
        // 최소 1번, 최대 100번 사이
        assert!(MAX_PORT_ATTEMPTS >= 1);
        assert!(MAX_PORT_ATTEMPTS <= 100);
    }
}
