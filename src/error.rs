//! Error types for request handling and configuration.
//!
//! Every request-level failure is terminal for that request and is reported
//! as HTTP 400 with a short plain-text body. Upstream error details are
//! logged, never returned.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Which token the caller failed to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The `state` query parameter is absent or differs from the state cookie.
    #[error("state_mismatch")]
    StateMismatch,

    /// The token endpoint rejected the grant or could not be reached.
    #[error("invalid_token")]
    TokenExchangeFailed,

    /// A required token was not supplied, or the upstream refused it.
    #[error("Missing {0} token")]
    MissingToken(TokenKind),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}
