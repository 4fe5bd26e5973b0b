use crate::feed::event::*;
use crate::prelude::*;

use serde::{Deserialize, Serialize};

/// A state event broadcast to a wall's subscribers.
///
/// Events originate from the server after it has committed the underlying
/// mutation; the payloads therefore carry canonical records, never requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WallEvent {
    /// The event ID assigned by the originating server.
    pub id: EventId,

    /// The Unix timestamp at which this event was created.
    pub timestamp: i64,

    /// The wall whose subscribers receive this event.
    pub wall: WallId,

    /// The target object being updated by this event.
    pub target: ObjectId,

    /// The actual type and content of the event.
    pub details: EventDetails,
}
