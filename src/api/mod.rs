//! # API Module
//!
//! HTTP handlers for the browser-facing side of the service.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Sets the anti-CSRF state cookie and redirects to the Spotify
//!   authorize page.
//! - [`callback`] - Checks the returned state against the cookie, exchanges
//!   the authorization code and hands the tokens to the browser.
//! - [`refresh`] - Trades a refresh token for a new access token.
//!
//! ### Proxy
//!
//! - [`tracks`] / [`artists`] - Forward the caller's access token to
//!   `GET /me/top/{tracks|artists}` and return the body unchanged.
//!
//! ### Monitoring
//!
//! - [`health`] - Application status and version.
//!
//! ## Session Model
//!
//! The server keeps no session table. The expected state lives in a cookie
//! on the browser that started the login, and tokens are returned to the
//! browser as cookies or query parameters. Concurrent logins from different
//! browsers never share server memory.
//!
//! All failures are `400 Bad Request` with a short plain-text body, see
//! [`crate::error::AuthError`].

mod callback;
mod health;
mod login;
mod refresh;
mod top;

use std::collections::HashMap;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use refresh::refresh;
pub use top::{artists, tracks};

/// Cookie holding the expected state between `/login` and `/callback`.
pub const STATE_KEY: &str = "spotify_auth_state";
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Reads a token from the query string, falling back to the cookie of the
/// same name. Empty values count as absent.
fn token_param(params: &HashMap<String, String>, jar: &CookieJar, name: &str) -> Option<String> {
    params
        .get(name)
        .filter(|v| !v.is_empty())
        .cloned()
        .or_else(|| {
            jar.get(name)
                .map(|c| c.value().to_string())
                .filter(|v| !v.is_empty())
        })
}
