//! WebSocket 구독 핸들러.
//!
//! GET /ws 업그레이드. 서버→구독자 단방향 푸시 전용 —
//! 구독자→서버 메시지는 소비하지 않는다 (Close만 감지).

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use std::sync::Arc;
use tracing::debug;

use crate::hub::SubscriberHub;
use crate::AppState;

/// WebSocket 업그레이드
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state.hub.clone()))
}

/// 구독자 소켓 수명 관리: 등록 → 푸시 포워딩 → 해제 시 제거
async fn handle_socket(mut socket: WebSocket, hub: Arc<SubscriberHub>) {
    let (id, mut rx) = hub.add();
    debug!(%id, "구독자 연결");

    loop {
        tokio::select! {
            payload = rx.recv() => {
                match payload {
                    Some(text) => {
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    // 허브가 구독자를 제거한 경우 (publish 중 prune 등)
                    None => break,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    // 구독자→서버 메시지는 무시 (Ping/Pong은 전송 계층이 처리)
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    hub.remove(id);
    debug!(%id, "구독자 해제");
}
