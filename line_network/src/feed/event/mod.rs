mod event;
pub use event::*;

pub mod details;
pub use details::EventDetails;
