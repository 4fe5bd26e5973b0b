//! The realtime event channel seam.
//!
//! A connection is owned outright by the session that created it: the
//! session subscribes to exactly one wall when it is built, and dropping
//! the subscription (or the session holding it) tells the implementation to
//! stop delivering. There is no shared global socket for subscriptions to
//! leak into.

use line_network::prelude::*;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Couldn't open realtime channel: {0}")]
    ConnectFailed(String),
    #[error("Realtime channel closed")]
    Closed,
}

/// A live event stream for one wall.
///
/// The implementation behind the [`RealtimeConnection`] pushes events into
/// the channel; when it drops the sending side the stream ends and the
/// session will try to resubscribe.
pub struct WallSubscription {
    wall: WallId,
    events: UnboundedReceiver<WallEvent>,
}

impl WallSubscription {
    pub fn new(wall: WallId, events: UnboundedReceiver<WallEvent>) -> Self {
        Self { wall, events }
    }

    pub fn wall(&self) -> WallId {
        self.wall
    }

    /// The next event, or `None` once the connection has gone away
    pub async fn recv(&mut self) -> Option<WallEvent> {
        self.events.recv().await
    }
}

/// A connection to the realtime broadcast layer
#[async_trait]
pub trait RealtimeConnection: Send + Sync {
    /// Open the event stream for a wall
    async fn subscribe(&self, wall: WallId) -> Result<WallSubscription, ConnectionError>;
}
