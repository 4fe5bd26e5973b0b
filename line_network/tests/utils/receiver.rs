use line_network::prelude::*;

pub struct NoOpUpdateReceiver;

impl FeedUpdateReceiver for NoOpUpdateReceiver {
    fn notify_update(&self, _update: FeedStateChange) {}
}
