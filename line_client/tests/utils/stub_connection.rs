use line_client::realtime::{ConnectionError, RealtimeConnection, WallSubscription};
use line_network::prelude::*;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// A realtime connection that hands out exactly one scripted event stream.
///
/// Dropping the returned sender ends the stream; the session's resubscribe
/// attempt then fails, which is how connection-loss behaviour comes up in
/// tests.
pub struct StubConnection {
    stream: Mutex<Option<UnboundedReceiver<WallEvent>>>,
}

impl StubConnection {
    pub fn new() -> (UnboundedSender<WallEvent>, Self) {
        let (tx, rx) = unbounded_channel();
        (
            tx,
            Self {
                stream: Mutex::new(Some(rx)),
            },
        )
    }
}

#[async_trait]
impl RealtimeConnection for StubConnection {
    async fn subscribe(&self, wall: WallId) -> Result<WallSubscription, ConnectionError> {
        self.stream
            .lock()
            .take()
            .map(|events| WallSubscription::new(wall, events))
            .ok_or_else(|| ConnectionError::ConnectFailed("stream already taken".to_string()))
    }
}
