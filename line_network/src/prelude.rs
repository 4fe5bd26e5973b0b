//! Collects commonly-used names for convenient import

pub use crate::{
    feed::errors::{LookupError, LookupResult},
    feed::event::{EventDetails, WallEvent},
    feed::*,
    id::*,
    validated::*,
};
