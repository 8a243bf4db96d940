//! 분석 사이클 오케스트레이션.
//!
//! 캡처 → 분석 → 브로드캐스트 1사이클. 타이머 루프(coopcam-app)와
//! 수동 트리거 엔드포인트(coopcam-web)가 동일한 시퀀스를 호출한다.
//!
//! 사이클 간 상태 없음: 이동 평균도, 이전 결과와의 비교도 하지 않는다.
//! 어느 단계든 실패하면 사이클만 중단되고 부분 브로드캐스트는 없다.

use std::sync::Arc;
use tracing::debug;

use crate::error::CoreError;
use crate::models::analysis::AnalysisResult;
use crate::models::frame::EncodedFrame;
use crate::ports::{CoopAnalyzer, FrameSource, ResultSink};

/// 프레임 캡처만 수행 (블로킹 캡처를 워커 스레드로 격리)
///
/// `/api/frame` 디버깅 엔드포인트용 — 분석/브로드캐스트 없음.
pub async fn grab_frame(source: Arc<dyn FrameSource>) -> Result<EncodedFrame, CoreError> {
    tokio::task::spawn_blocking(move || source.grab())
        .await
        .map_err(|e| CoreError::Internal(format!("캡처 태스크 join 실패: {e}")))?
}

/// 사이클 1회 실행: 캡처 → 분석 → 발행.
///
/// 성공 시 발행된 결과를 반환한다 (수동 트리거가 호출자에게 되돌려줄 때 사용).
/// 실패 시 해당 단계의 에러를 그대로 전파하며 발행은 일어나지 않는다.
pub async fn run_cycle(
    source: Arc<dyn FrameSource>,
    analyzer: Arc<dyn CoopAnalyzer>,
    sink: Arc<dyn ResultSink>,
) -> Result<AnalysisResult, CoreError> {
    let frame = grab_frame(source).await?;
    debug!(
        bytes = frame.data.len(),
        width = frame.width,
        height = frame.height,
        "프레임 캡처 완료"
    );

    let result = analyzer.analyze(&frame).await?;

    let delivered = sink.publish(&result);
    debug!(delivered, "분석 결과 브로드캐스트");

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FakeSource;

    impl FrameSource for FakeSource {
        fn grab(&self) -> Result<EncodedFrame, CoreError> {
            Ok(EncodedFrame {
                data: vec![0xAB; 16],
                base64: "q6urq6urq6urq6urq6urqw==".to_string(),
                mime: "image/webp".to_string(),
                quality: 80,
                width: 320,
                height: 240,
            })
        }
    }

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn grab(&self) -> Result<EncodedFrame, CoreError> {
            Err(CoreError::Capture("디스플레이 없음".to_string()))
        }
    }

    struct FakeAnalyzer {
        result: AnalysisResult,
    }

    #[async_trait]
    impl CoopAnalyzer for FakeAnalyzer {
        async fn analyze(&self, _frame: &EncodedFrame) -> Result<AnalysisResult, CoreError> {
            Ok(self.result.clone())
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl CoopAnalyzer for FailingAnalyzer {
        async fn analyze(&self, _frame: &EncodedFrame) -> Result<AnalysisResult, CoreError> {
            Err(CoreError::Analysis("제공자 503".to_string()))
        }
    }

    /// 발행 호출을 기록하는 싱크
    struct RecordingSink {
        published: Mutex<Vec<AnalysisResult>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                published: Mutex::new(Vec::new()),
            }
        }
    }

    impl ResultSink for RecordingSink {
        fn publish(&self, result: &AnalysisResult) -> usize {
            self.published.lock().unwrap().push(result.clone());
            1
        }
    }

    #[tokio::test]
    async fn cycle_publishes_exact_result_once() {
        let expected = json!({"temperature": 70, "eggs": 3, "hens": []});
        let sink = Arc::new(RecordingSink::new());

        let result = run_cycle(
            Arc::new(FakeSource),
            Arc::new(FakeAnalyzer {
                result: expected.clone(),
            }),
            sink.clone(),
        )
        .await
        .unwrap();

        assert_eq!(result, expected);
        let published = sink.published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0], expected);
    }

    #[tokio::test]
    async fn analyzer_failure_publishes_nothing() {
        let sink = Arc::new(RecordingSink::new());

        let err = run_cycle(
            Arc::new(FakeSource),
            Arc::new(FailingAnalyzer),
            sink.clone(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::Analysis(_)));
        assert!(sink.published.lock().unwrap().is_empty());

        // 실패 후에도 다음 사이클은 정상 실행 가능해야 함
        let ok = run_cycle(
            Arc::new(FakeSource),
            Arc::new(FakeAnalyzer {
                result: json!({"eggs": 1}),
            }),
            sink.clone(),
        )
        .await;
        assert!(ok.is_ok());
        assert_eq!(sink.published.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn capture_failure_skips_analysis_and_publish() {
        let sink = Arc::new(RecordingSink::new());

        let err = run_cycle(
            Arc::new(FailingSource),
            Arc::new(FakeAnalyzer {
                result: json!({}),
            }),
            sink.clone(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CoreError::Capture(_)));
        assert!(sink.published.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn grab_frame_returns_frame_without_publish() {
        let sink = Arc::new(RecordingSink::new());
        let frame = grab_frame(Arc::new(FakeSource)).await.unwrap();
        assert_eq!(frame.width, 320);
        assert!(sink.published.lock().unwrap().is_empty());
    }
}
