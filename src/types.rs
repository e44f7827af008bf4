use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Tokens handed to the caller after a successful code exchange.
///
/// The server keeps no copy; the pair lives for one request/response cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Body of a 200 answer from the accounts service token endpoint.
///
/// Refresh grants may omit `refresh_token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "medium_term" => Ok(TimeRange::MediumTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            other => Err(format!("unknown time range: {}", other)),
        }
    }
}

/// The two "top items" collections exposed by the Web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopItemKind {
    Tracks,
    Artists,
}

impl TopItemKind {
    pub fn path(&self) -> &'static str {
        match self {
            TopItemKind::Tracks => "tracks",
            TopItemKind::Artists => "artists",
        }
    }
}

/// Input of a proxied top items call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopItemsQuery {
    pub access_token: String,
    pub range: TimeRange,
    /// Expected in `[0, 50]`; the handler clamps before building the query.
    pub limit: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_range_parse() {
        assert_eq!("short_term".parse::<TimeRange>(), Ok(TimeRange::ShortTerm));
        assert_eq!("medium_term".parse::<TimeRange>(), Ok(TimeRange::MediumTerm));
        assert_eq!("long_term".parse::<TimeRange>(), Ok(TimeRange::LongTerm));
        assert!("forever".parse::<TimeRange>().is_err());
        assert!("LONG_TERM".parse::<TimeRange>().is_err());
    }

    #[test]
    fn test_time_range_display_matches_wire_value() {
        for range in [TimeRange::ShortTerm, TimeRange::MediumTerm, TimeRange::LongTerm] {
            assert_eq!(range.to_string().parse::<TimeRange>(), Ok(range));
        }
    }

    #[test]
    fn test_token_response_without_refresh_token() {
        let body = r#"{"access_token":"AT","token_type":"Bearer","expires_in":3600}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "AT");
        assert!(parsed.refresh_token.is_none());
    }
}
