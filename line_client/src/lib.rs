//! Client-side engine for a wall feed.
//!
//! This crate primarily exists to support the [`FeedSession`] type, which
//! combines optimistic local mutations with realtime server events over a
//! single [`Feed`](line_network::feed::Feed).
//!
//! # Mutations
//!
//! Every mutation on a session runs in three phases: the intended outcome
//! is applied to local state immediately, the collaborator API call is
//! awaited, and then either the canonical server record replaces the local
//! guess or the pre-mutation snapshot is restored. State changes are
//! reported through the same [`FeedStateChange`](line_network::feed::update)
//! stream regardless of whether they came from a local mutation or a
//! realtime event, so a renderer has exactly one thing to watch.
//!
//! # Collaborators
//!
//! The HTTP backend and the realtime broadcast layer are injected behind
//! the [`MessageApi`](api::MessageApi) and
//! [`RealtimeConnection`](realtime::RealtimeConnection) traits; this crate
//! contains no transport code.

pub mod api;
pub mod errors;
pub mod policy;
pub mod realtime;
pub mod session;

pub use session::FeedSession;
pub use session::SessionStop;
