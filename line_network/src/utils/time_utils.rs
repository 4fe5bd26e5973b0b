use chrono::Utc;

/// The current time, as the unix timestamp format stored in state objects
pub fn now() -> i64 {
    Utc::now().timestamp()
}
