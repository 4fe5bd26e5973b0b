pub mod prelude;

pub mod id;
pub mod validated;

pub mod feed;

pub mod utils;
