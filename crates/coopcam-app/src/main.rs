//! # coopcam
//!
//! COOPCAM 바이너리 진입점.
//! 설정 로드 → 포트 구현 조립 → 분석 루프 + 웹 서버 실행.

mod scheduler;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use coopcam_core::config_manager;
use coopcam_core::pipeline;
use coopcam_core::ports::{CoopAnalyzer, FrameSource, ResultSink};
use coopcam_network::RemoteVisionAnalyzer;
use coopcam_vision::CoopFrameSource;
use coopcam_web::{AppState, SubscriberHub, WebServer};

use crate::scheduler::AnalysisLoop;

/// COOPCAM — 닭장 라이브 피드 AI 모니터
///
/// 주기적으로 화면을 캡처해 비전 모델로 해석하고,
/// 결과를 연결된 오버레이 뷰어에 실시간 푸시한다.
#[derive(Parser, Debug)]
#[command(name = "coopcam")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 리스닝 포트 오버라이드
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 분석 주기(초) 오버라이드
    #[arg(long, short = 'i')]
    interval: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 사이클 1회만 실행해 결과를 출력하고 종료 (운영자 디버깅)
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    // 설정: 파일 → 환경변수 → CLI 순으로 오버라이드
    let mut config = config_manager::load(args.config.clone()).context("설정 로드 실패")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(interval) = args.interval {
        config.analyzer.interval_secs = interval;
    }

    info!(
        port = config.server.port,
        interval_secs = config.analyzer.interval_secs,
        model = %config.analyzer.model,
        "COOPCAM 시작"
    );

    // 포트 구현 조립
    let frame_source: Arc<dyn FrameSource> =
        Arc::new(CoopFrameSource::new(config.capture.clone()));
    let analyzer: Arc<dyn CoopAnalyzer> = Arc::new(RemoteVisionAnalyzer::new(&config.analyzer)?);
    let hub = Arc::new(SubscriberHub::new());

    if args.once {
        let sink: Arc<dyn ResultSink> = hub.clone();
        let result = pipeline::run_cycle(frame_source, analyzer, sink)
            .await
            .context("분석 사이클 실패")?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // 분석 루프
    let loop_task = {
        let analysis_loop = AnalysisLoop::new(
            frame_source.clone(),
            analyzer.clone(),
            hub.clone(),
            config.analyzer.interval(),
            config.analyzer.startup_delay(),
        );
        let rx = shutdown_rx.clone();
        tokio::spawn(async move { analysis_loop.run(rx).await })
    };

    // 웹 서버 (제어 API + WebSocket + 오버레이)
    let state = AppState::new(
        hub,
        frame_source,
        analyzer,
        config.analyzer.interval_secs,
    );
    let server = WebServer::new(state, config.server.clone());
    let mut server_task = tokio::spawn(server.run(shutdown_rx));

    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("ctrl-c 핸들러 등록 실패")?;
            info!("종료 신호 수신, 정리 중...");
        }
        result = &mut server_task => {
            // 서버가 스스로 종료한 경우 (포트 바인드 실패 등)
            let _ = shutdown_tx.send(true);
            let _ = loop_task.await;
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(anyhow!("웹 서버 에러: {e}")),
                Err(e) => Err(anyhow!("서버 태스크 join 실패: {e}")),
            };
        }
    }

    let _ = shutdown_tx.send(true);
    let _ = loop_task.await;
    match server_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("웹 서버 종료 중 에러: {e}"),
        Err(e) => error!("서버 태스크 join 실패: {e}"),
    }

    info!("COOPCAM 종료");
    Ok(())
}
