//! WebSocket 구독자 허브.
//!
//! 현재 연결된 구독자 집합을 소유하고 add/remove/publish를 제공한다.
//! 전역 가변 리스트 없음 — 집합은 허브 내부에 캡슐화된다.
//!
//! 전달 보장 없음: 큐잉/확인응답/backpressure 없이, 닫힌 구독자는
//! 에러 없이 건너뛰고 집합에서 제거한다. 구독자 수는 수십 규모를 가정한다.

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use coopcam_core::models::analysis::AnalysisResult;
use coopcam_core::ports::ResultSink;

/// 구독자 1명 — 연결 시 생성, 해제 시 제거. 그 외 변경 없음.
struct Subscriber {
    id: Uuid,
    tx: mpsc::UnboundedSender<String>,
}

/// 구독자 허브 — `ResultSink` 포트 구현
pub struct SubscriberHub {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl SubscriberHub {
    /// 빈 허브 생성
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// 구독자 등록. (식별자, 수신 채널) 반환.
    ///
    /// 호출자는 수신 채널에서 직렬화된 결과를 읽어 소켓에 전달한다.
    pub fn add(&self) -> (Uuid, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        self.subscribers.lock().push(Subscriber { id, tx });
        debug!(%id, total = self.count(), "구독자 등록");
        (id, rx)
    }

    /// 구독자 제거 — 식별자 기반 필터링
    pub fn remove(&self, id: Uuid) {
        self.subscribers.lock().retain(|s| s.id != id);
        debug!(%id, total = self.count(), "구독자 제거");
    }

    /// 현재 구독자 수
    pub fn count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl Default for SubscriberHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for SubscriberHub {
    /// 결과를 1회 직렬화해 모든 열린 구독자에게 전송.
    ///
    /// 송신 실패(수신측 해제)한 구독자는 집합에서 바로 제거한다.
    fn publish(&self, result: &AnalysisResult) -> usize {
        let payload = match serde_json::to_string(result) {
            Ok(p) => p,
            Err(e) => {
                warn!("분석 결과 직렬화 실패: {e}");
                return 0;
            }
        };

        let mut subscribers = self.subscribers.lock();
        let mut delivered = 0;

        subscribers.retain(|s| match s.tx.send(payload.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                debug!(id = %s.id, "닫힌 구독자 건너뜀");
                false
            }
        });

        delivered
    }
}
