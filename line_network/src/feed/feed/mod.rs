//! Defines the [Feed] object.

use crate::feed::comment_tree::CommentTree;
use crate::feed::config;
use crate::feed::event::*;
use crate::feed::update::*;
use crate::prelude::*;

use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use std::collections::HashMap;

/// Stores the synchronized state of one wall feed.
///
/// ## General Principles
///
/// A `Feed` object is fully serializable and cloneable; all objects within it
/// refer to each other by unique ID and not by reference.
///
/// The `Feed` stores only raw state objects, which themselves provide no
/// logic or other utility. Short-lived wrapper objects are created and
/// returned by most public methods, which wrap a reference to the underlying
/// state and provide convenience accessors for associated objects.
///
/// In line with Rust's borrowing rules, these wrappers cannot outlive the
/// calling code's borrow of the `Feed`, and should not be stored. Code
/// outside this module that needs to keep track of feed objects should store
/// keys and look them up as required.
///
/// State changes enter a `Feed` two ways: server events merged through
/// [`apply`](Self::apply), and the direct mutators used by the optimistic
/// client engine. Both funnel through the same internal update paths, so
/// both produce the same [`FeedStateChange`] notifications.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    wall: state::Wall,

    // These maps are serialised as arrays of tuples because their keys
    // don't serialise as strings, so can't be used as JSON object keys.
    #[serde_as(as = "Vec<(_,_)>")]
    messages: HashMap<MessageKey, state::Message>,
    /// Display order; newest first. Every key in here has an entry in
    /// `messages` and vice versa.
    message_order: Vec<MessageKey>,

    #[serde_as(as = "Vec<(_,_)>")]
    comment_trees: HashMap<MessageId, CommentTree>,

    #[serde_as(as = "Vec<(_,_)>")]
    users: HashMap<UserId, state::User>,

    /// The authenticated local user, if any. Used to suppress echo of the
    /// viewer's own creation events and to maintain `my_reaction` pointers.
    viewer: Option<UserId>,

    config: config::FeedConfig,
}

impl Feed {
    /// Create an empty feed state for the given wall.
    pub fn new(wall: state::Wall, viewer: Option<UserId>, config: config::FeedConfig) -> Feed {
        Feed {
            wall,
            messages: HashMap::new(),
            message_order: Vec::new(),
            comment_trees: HashMap::new(),
            users: HashMap::new(),
            viewer,
            config,
        }
    }

    /// Apply a [WallEvent] to the feed state.
    ///
    /// This is the only entry point for server-originated changes. Events
    /// may arrive more than once (a direct HTTP response and the matching
    /// socket broadcast both produce one), in which case the second
    /// application is a no-op and emits no updates.
    ///
    /// ## Arguments
    ///
    /// - `event`: the event to apply
    /// - `updates`: an implementation of [FeedUpdateReceiver] which will be
    ///   used to notify the caller of any changes in feed state that result
    ///   from the processing of this event.
    ///
    /// ## Return Value
    ///
    /// `Ok(())` if the event was processed. `Err(_)` if there is a mismatch
    /// between the expected target object for the event type and the
    /// provided target ID type.
    ///
    /// Events referring to objects this feed doesn't know about are ignored
    /// silently; the server is authoritative and no placeholder objects are
    /// ever synthesized from partial data.
    #[tracing::instrument(skip_all, fields(event = ?event.id))]
    pub fn apply(
        &mut self,
        event: &WallEvent,
        updates: &dyn FeedUpdateReceiver,
    ) -> Result<(), WrongIdTypeError> {
        if event.wall != self.wall.id {
            tracing::debug!(wall = ?event.wall, "Ignoring event for another wall");
            return Ok(());
        }

        match &event.details {
            EventDetails::NewMessage(details) => {
                self.new_message(event.target.try_into()?, details, updates)
            }
            EventDetails::MessageUpdated(details) => {
                self.message_updated(event.target.try_into()?, details, updates)
            }
            EventDetails::MessageDeleted(details) => {
                self.message_deleted(event.target.try_into()?, details, updates)
            }
            EventDetails::MessagePinned(details) => {
                self.message_pinned(event.target.try_into()?, details, updates)
            }
            EventDetails::LikeUpdated(details) => {
                self.like_updated(event.target.try_into()?, details, updates)
            }
            EventDetails::NewComment(details) => {
                self.new_comment(event.target.try_into()?, details, updates)
            }
            EventDetails::NestedReplyAdded(details) => {
                self.nested_reply_added(event.target.try_into()?, details, updates)
            }
            EventDetails::CommentUpdated(details) => {
                self.comment_updated(event.target.try_into()?, details, updates)
            }
            EventDetails::CommentDeleted(details) => {
                self.comment_deleted(event.target.try_into()?, details, updates)
            }
            EventDetails::MessageReactionUpdated(details) => {
                self.message_reaction_updated(event.target.try_into()?, details, updates)
            }
            EventDetails::CommentReactionUpdated(details) => {
                self.comment_reaction_updated(event.target.try_into()?, details, updates)
            }
        }

        Ok(())
    }

    /// Record or refresh an author snapshot in the user directory.
    pub fn upsert_user(&mut self, user: &state::User) {
        self.users.insert(user.id, user.clone());
    }

    /// The viewer's entry in an authoritative reaction map, if any.
    fn my_reaction_in(&self, reactions: &state::ReactionSet) -> Option<Emoji> {
        self.viewer.and_then(|viewer| reactions.reaction_of(viewer))
    }
}

mod accessors;

mod comment_state;
pub use comment_state::CommentInserted;
mod message_state;
mod reaction_state;
