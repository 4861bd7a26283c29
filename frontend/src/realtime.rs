use futures::channel::oneshot;
use futures::{select, FutureExt, SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use gloo_timers::future::IntervalStream;
use shared::models::{decode_vote_insert, SocketMessage};
use yew::Callback;

use crate::config::HEARTBEAT_INTERVAL_MS;

/// Live subscription to vote inserts over the realtime socket.
///
/// Best effort by design: if the socket fails to open, errors mid-stream, or
/// the service closes it, the task simply ends and the poll loop keeps the
/// totals honest. Dropping the handle tears the socket down, so unmounting
/// the view releases it on every exit path.
pub struct Subscription {
    close: Option<oneshot::Sender<()>>,
}

impl Subscription {
    pub fn start(url: &str, on_insert: Callback<String>) -> Option<Self> {
        let ws = WebSocket::open(url).ok()?;
        let (close_tx, close_rx) = oneshot::channel();
        wasm_bindgen_futures::spawn_local(run(ws, on_insert, close_rx));
        Some(Self { close: Some(close_tx) })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
    }
}

async fn run(ws: WebSocket, on_insert: Callback<String>, close_rx: oneshot::Receiver<()>) {
    let (mut write, read) = ws.split();
    let mut reference: u64 = 1;

    if write
        .send(Message::Text(SocketMessage::join(reference).to_json()))
        .await
        .is_err()
    {
        return;
    }

    let mut read = read.fuse();
    let mut heartbeat = IntervalStream::new(HEARTBEAT_INTERVAL_MS).fuse();
    let mut close_rx = close_rx.fuse();

    loop {
        select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(candidate_id) = decode_vote_insert(&text) {
                        on_insert.emit(candidate_id);
                    }
                }
                Some(Ok(Message::Bytes(_))) => {}
                Some(Err(_)) | None => break,
            },
            _ = heartbeat.next() => {
                reference += 1;
                let beat = SocketMessage::heartbeat(reference).to_json();
                if write.send(Message::Text(beat)).await.is_err() {
                    break;
                }
            },
            _ = close_rx => break,
        }
    }
    // Both socket halves drop here, closing the connection.
}
