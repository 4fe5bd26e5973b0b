//! The feed session: one wall, one viewer, one realtime stream.

use crate::api::MessageApi;
use crate::errors::{EngineError, ValidationError};
use crate::policy::SessionPolicy;
use crate::realtime::{ConnectionError, RealtimeConnection, WallSubscription};

use line_network::prelude::*;
use line_network::utils::{self, OrLog};

use parking_lot::{RwLock, RwLockReadGuard};
use tokio::{
    select,
    sync::{broadcast, mpsc::UnboundedSender, Mutex},
};

use std::sync::Arc;

mod mutations;

/// Why [`run`](FeedSession::run) returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStop {
    /// The shutdown channel fired or closed
    Shutdown,
    /// The realtime stream ended and couldn't be reopened
    ConnectionLost,
}

/// A live view of one wall.
///
/// The session owns everything it needs: the local [`Feed`] behind a
/// `parking_lot` lock, the backend API collaborator, and the realtime
/// connection with its single wall subscription. Mutations apply
/// optimistically and reconcile against the server; realtime events merge
/// through [`Feed::apply`]. Both paths report state changes through the
/// same subscriber channel.
///
/// Locks are held only for synchronous state work, never across an await,
/// so any number of mutations can be in flight while the feed stays
/// readable.
pub struct FeedSession {
    feed: RwLock<Feed>,
    api: Arc<dyn MessageApi>,
    connection: Box<dyn RealtimeConnection>,
    // This needs to be a tokio mutex because `run()` holds it for the whole
    // of its loop, which awaits a lot
    subscription: Mutex<WallSubscription>,
    subscriber: UnboundedSender<FeedStateChange>,
    policy: SessionPolicy,
}

impl FeedSession {
    /// Open a session on a wall.
    ///
    /// Subscribes to the wall's realtime stream before returning, so no
    /// broadcast following a successful connect can be missed. The feed
    /// starts empty; call
    /// [`load_messages`](Self::load_messages) to hydrate it.
    pub async fn connect(
        wall: state::Wall,
        policy: SessionPolicy,
        config: config::FeedConfig,
        api: Arc<dyn MessageApi>,
        connection: Box<dyn RealtimeConnection>,
        subscriber: UnboundedSender<FeedStateChange>,
    ) -> Result<Self, ConnectionError> {
        let subscription = connection.subscribe(wall.id).await?;

        Ok(Self {
            feed: RwLock::new(Feed::new(wall, policy.viewer(), config)),
            api,
            connection,
            subscription: Mutex::new(subscription),
            subscriber,
            policy,
        })
    }

    /// Read access to the local feed state.
    ///
    /// The guard must not be held across an await.
    pub fn feed(&self) -> RwLockReadGuard<Feed> {
        self.feed.read()
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Merge one realtime event into local state.
    ///
    /// The run loop feeds every subscribed event through here; it is public
    /// for callers that drive their own event delivery.
    #[tracing::instrument(skip(self))]
    pub fn apply_realtime_event(&self, event: WallEvent) {
        tracing::trace!("Applying inbound event");

        // Updates are queued and played back after the write lock is
        // released; subscribers may want read access to the feed
        let mut update_queue = SavedFeedUpdates::new();

        self.feed
            .write()
            .apply(&event, &update_queue)
            .or_log("Applying realtime event");

        update_queue.playback(self);
    }

    /// Run a state mutation under the write lock, playing back the emitted
    /// updates once the lock is released
    fn update_feed<R>(&self, f: impl FnOnce(&mut Feed, &dyn FeedUpdateReceiver) -> R) -> R {
        let mut update_queue = SavedFeedUpdates::new();

        let result = {
            let mut feed = self.feed.write();
            f(&mut feed, &update_queue)
        };

        update_queue.playback(self);
        result
    }

    /// Drive the realtime stream until shutdown.
    ///
    /// When the event stream ends, it is reopened through the owned
    /// connection; if that fails the loop stops.
    #[tracing::instrument(skip_all)]
    pub async fn run(
        self: Arc<Self>,
        mut shutdown_channel: broadcast::Receiver<()>,
    ) -> SessionStop {
        let mut subscription = self.subscription.lock().await;

        loop {
            tracing::trace!("session run loop");

            select! {
                event = subscription.recv() => {
                    match event {
                        Some(event) => self.apply_realtime_event(event),
                        None => {
                            let wall = subscription.wall();
                            tracing::debug!(?wall, "Realtime stream ended; resubscribing");
                            match self.connection.subscribe(wall).await {
                                Ok(reopened) => *subscription = reopened,
                                Err(e) => {
                                    tracing::error!("Couldn't resubscribe: {}", e);
                                    break SessionStop::ConnectionLost;
                                }
                            }
                        }
                    }
                },
                shutdown = shutdown_channel.recv() => {
                    if let Err(e) = shutdown {
                        tracing::error!("Got error ({}) from shutdown channel; exiting", e);
                    }
                    break SessionStop::Shutdown;
                },
            }
        }
    }
}

impl FeedUpdateReceiver for FeedSession {
    fn notify_update(&self, update: FeedStateChange) {
        self.subscriber.send(update).or_log("Notifying subscriber");
    }
}
