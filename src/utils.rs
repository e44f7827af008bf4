use rand::{Rng, distr::Alphanumeric};

use crate::types::TimeRange;

/// Length of the anti-CSRF state stored in the login cookie.
pub const STATE_LENGTH: usize = 16;

/// Default `limit` for top items when the query value is absent or not a number.
pub const DEFAULT_TOP_LIMIT: u8 = 10;

/// Upper bound accepted by the top items endpoints.
pub const MAX_TOP_LIMIT: u8 = 50;

/// Generates a random alphanumeric string of exactly `length` characters.
///
/// Each call draws from the thread-local generator, so values are independent
/// and nothing is shared between requests.
pub fn generate_random_state(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Parses a raw `limit` query value.
///
/// Absent or non-numeric input falls back to [`DEFAULT_TOP_LIMIT`]; numbers
/// outside `[0, 50]` are clamped.
pub fn parse_limit(raw: Option<&str>) -> u8 {
    match raw.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(n)) => n.clamp(0, MAX_TOP_LIMIT as i64) as u8,
        _ => DEFAULT_TOP_LIMIT,
    }
}

/// Parses a raw `time_range` query value, falling back to `short_term`.
pub fn parse_time_range(raw: Option<&str>) -> TimeRange {
    raw.and_then(|r| r.parse().ok()).unwrap_or_default()
}
