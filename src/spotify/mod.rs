//! # Spotify Integration Module
//!
//! Client side of the two upstream services this backend talks to:
//!
//! ```text
//! Handlers (api)
//!      ↓
//! Spotify
//!     ├── auth - authorize URL, state check, code and refresh grants
//!     └── top  - GET /me/top/{tracks|artists} pass-through
//!      ↓
//! reqwest
//!      ↓
//! accounts.spotify.com / api.spotify.com
//! ```
//!
//! A single [`Spotify`] value is built at startup and cloned into every
//! request. It holds no per-user data: tokens flow in with the request and
//! out with the response.
//!
//! ## Error Handling
//!
//! Every upstream failure collapses into one [`crate::error::AuthError`]
//! variant. The underlying cause is logged with `warning!` and dropped so no
//! upstream detail reaches the caller. Nothing is retried.

pub mod auth;
pub mod top;

use reqwest::Client;

use crate::{Res, config::Config};

pub use auth::{basic_auth_header, build_authorize_url, verify_state};

#[derive(Debug, Clone)]
pub struct Spotify {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scopes: Vec<String>,
    auth_url: url::Url,
    token_url: String,
    api_url: String,
}

impl Spotify {
    /// Builds the client from configuration.
    ///
    /// Outbound requests use `config.http_timeout` so a hung upstream cannot
    /// hold a request forever. Fails when `config.auth_url` is not a URL.
    pub fn new(config: &Config) -> Res<Self> {
        let http = Client::builder().timeout(config.http_timeout).build()?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
            auth_url: url::Url::parse(&config.auth_url)?,
            token_url: config.token_url.clone(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }
}
