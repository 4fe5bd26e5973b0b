use super::*;

use std::sync::mpsc::{channel, Receiver, Sender};

/// An update receiver that buffers changes for later playback.
///
/// Useful when the feed is mutated while a lock is held and the changes
/// should only reach the real receiver after the lock is released.
pub struct SavedFeedUpdates {
    sender: Sender<FeedStateChange>,
    receiver: Receiver<FeedStateChange>,
}

impl FeedUpdateReceiver for SavedFeedUpdates {
    fn notify_update(&self, update: FeedStateChange) {
        self.sender
            .send(update)
            .expect("failed to save feed state change");
    }
}

impl SavedFeedUpdates {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub fn playback(&mut self, into: &dyn FeedUpdateReceiver) {
        while let Ok(saved) = self.receiver.try_recv() {
            into.notify_update(saved);
        }
    }
}
