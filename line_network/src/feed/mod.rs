#![allow(clippy::module_inception)]
#![allow(clippy::new_without_default)]

/// Defines the various state objects making up a wall feed
pub mod state {
    mod attachment;
    mod comment;
    mod draft;
    mod message;
    mod reactions;
    mod user;
    mod wall;

    pub use attachment::*;
    pub use comment::*;
    pub use draft::*;
    pub use message::*;
    pub use reactions::*;
    pub use user::*;
    pub use wall::*;
}

/// Defines wrapper objects which provide accessor methods and basic
/// application logic for objects in [`state`]
pub mod wrapper {
    mod comment;
    mod message;
    mod wrapper;

    pub use wrapper::ObjectWrapper;
    pub use wrapper::WrapIterator;
    pub use wrapper::WrapOption;
    pub use wrapper::WrapResult;
    pub use wrapper::WrappedObjectIterator;

    pub use comment::Comment;
    pub use message::Message;
}

pub mod config;

pub mod event;

pub mod errors;
pub use errors::*;

pub mod comment_tree;
pub use comment_tree::{CommentNode, CommentTree, DetachedComment};

mod feed;
pub use feed::*;

pub mod update;
pub use update::FeedStateChange;
pub use update::FeedUpdateReceiver;

mod update_receiver;
pub use update_receiver::SavedFeedUpdates;
