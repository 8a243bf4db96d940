//! 분석 루프 스케줄러.
//!
//! 고정 주기 타이머가 캡처→분석→브로드캐스트 사이클을 반복 실행한다.
//! 각 tick은 이전 사이클의 완료(성공/실패)를 기다린 뒤에야 시작되므로
//! 타이머 사이클끼리는 겹치지 않는다. 수동 트리거와의 상호 배제는 없다.
//!
//! 사이클 실패는 로그로 기록하고 다음 tick을 기다린다 —
//! 루프나 프로세스로 전파되지 않는다.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use coopcam_core::pipeline;
use coopcam_core::ports::{CoopAnalyzer, FrameSource, ResultSink};

/// 분석 루프
pub struct AnalysisLoop {
    source: Arc<dyn FrameSource>,
    analyzer: Arc<dyn CoopAnalyzer>,
    sink: Arc<dyn ResultSink>,
    /// 반복 주기
    interval: Duration,
    /// 프로세스 시작 후 첫 사이클까지 지연
    startup_delay: Duration,
}

impl AnalysisLoop {
    /// 새 분석 루프 생성
    pub fn new(
        source: Arc<dyn FrameSource>,
        analyzer: Arc<dyn CoopAnalyzer>,
        sink: Arc<dyn ResultSink>,
        interval: Duration,
        startup_delay: Duration,
    ) -> Self {
        Self {
            source,
            analyzer,
            sink,
            interval,
            startup_delay,
        }
    }

    /// 루프 실행 — 종료 신호까지 반복
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "분석 루프 시작: 주기 {}s, 시작 지연 {}s",
            self.interval.as_secs(),
            self.startup_delay.as_secs()
        );

        // 시작 직후 1회 — 반복 타이머와 독립
        tokio::select! {
            _ = tokio::time::sleep(self.startup_delay) => self.run_once().await,
            _ = shutdown_signalled(&mut shutdown_rx) => return,
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval의 첫 tick은 즉시 발화하므로 소모
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.run_once().await,
                _ = shutdown_signalled(&mut shutdown_rx) => {
                    info!("분석 루프 종료");
                    return;
                }
            }
        }
    }

    /// 사이클 1회 — 실패는 기록 후 무시
    async fn run_once(&self) {
        match pipeline::run_cycle(
            self.source.clone(),
            self.analyzer.clone(),
            self.sink.clone(),
        )
        .await
        {
            Ok(_) => info!("분석 사이클 완료"),
            Err(e) => warn!("분석 사이클 실패: {e}"),
        }
    }
}

/// 종료 신호 대기
async fn shutdown_signalled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
