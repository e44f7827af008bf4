//! Configuration management for the top items backend.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The lookup order is:
//! 1. Process environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`topspot/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_LANDING_PATH: &str = "/logged";
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `.env` files.
///
/// The working directory is tried first, then the platform-specific local
/// data directory:
/// - Linux: `~/.local/share/topspot/.env`
/// - macOS: `~/Library/Application Support/topspot/.env`
/// - Windows: `%LOCALAPPDATA%/topspot/.env`
///
/// Missing files are skipped. Variables already present in the process
/// environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let local = PathBuf::from(".env");
    if local.is_file() {
        dotenv::from_path(&local).map_err(|e| e.to_string())?;
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("topspot/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// How tokens reach the browser after a successful callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenDelivery {
    /// Set `access_token` / `refresh_token` cookies and redirect to `landing`.
    Cookie { landing: String },
    /// Redirect to `frontend_uri` with the tokens as query parameters.
    Query { frontend_uri: Url },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Requested scopes, in the order they are sent.
    pub scopes: Vec<String>,
    /// Validated by `from_env`; parsed again by [`crate::spotify::Spotify::new`].
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
    /// Allowed CORS origin. `None` allows any origin.
    pub frontend_origin: Option<String>,
    pub token_delivery: TokenDelivery,
    pub static_dir: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    /// Builds a config with the given client credentials and every other
    /// setting at its default.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: split_scopes(DEFAULT_SCOPE),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            frontend_origin: None,
            token_delivery: TokenDelivery::Cookie {
                landing: DEFAULT_LANDING_PATH.to_string(),
            },
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Reads the whole configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails when a required variable is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            required("SPOTIFY_API_REDIRECT_URI")?,
        );

        if let Some(scope) = optional("SPOTIFY_API_AUTH_SCOPE") {
            config.scopes = split_scopes(&scope);
        }
        if let Some(auth_url) = optional("SPOTIFY_API_AUTH_URL") {
            parse_url("SPOTIFY_API_AUTH_URL", &auth_url)?;
            config.auth_url = auth_url;
        }
        if let Some(token_url) = optional("SPOTIFY_API_TOKEN_URL") {
            config.token_url = token_url;
        }
        if let Some(api_url) = optional("SPOTIFY_API_URL") {
            config.api_url = api_url.trim_end_matches('/').to_string();
        }
        if let Some(addr) = optional("SERVER_ADDRESS") {
            config.server_addr = addr;
        }
        config.frontend_origin = optional("FRONTEND_ORIGIN");
        config.token_delivery = token_delivery(
            optional("TOKEN_DELIVERY").as_deref(),
            optional("FRONTEND_URI").as_deref(),
        )?;
        if let Some(dir) = optional("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(secs) = optional("HTTP_TIMEOUT_SECS") {
            let secs = u64::from_str(&secs).map_err(|e| ConfigError::Invalid {
                var: "HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    optional(var).ok_or(ConfigError::Missing(var))
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

/// Splits a space separated scope list, keeping the given order.
pub fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}

/// Resolves `TOKEN_DELIVERY` / `FRONTEND_URI` into a [`TokenDelivery`].
///
/// `cookie` (the default) redirects to `FRONTEND_URI` when given, otherwise
/// to the bundled landing page. `query` requires `FRONTEND_URI`.
pub fn token_delivery(
    mode: Option<&str>,
    frontend_uri: Option<&str>,
) -> Result<TokenDelivery, ConfigError> {
    match mode.map(str::to_ascii_lowercase).as_deref() {
        None | Some("cookie") => Ok(TokenDelivery::Cookie {
            landing: frontend_uri.unwrap_or(DEFAULT_LANDING_PATH).to_string(),
        }),
        Some("query") => {
            let uri = frontend_uri.ok_or(ConfigError::Missing("FRONTEND_URI"))?;
            Ok(TokenDelivery::Query {
                frontend_uri: parse_url("FRONTEND_URI", uri)?,
            })
        }
        Some(other) => Err(ConfigError::Invalid {
            var: "TOKEN_DELIVERY",
            reason: format!("expected `cookie` or `query`, got `{}`", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scopes_keeps_order() {
        assert_eq!(
            split_scopes("user-top-read  user-read-email"),
            vec!["user-top-read", "user-read-email"]
        );
        assert!(split_scopes("   ").is_empty());
    }

    #[test]
    fn test_token_delivery_defaults_to_cookie() {
        assert_eq!(
            token_delivery(None, None).unwrap(),
            TokenDelivery::Cookie {
                landing: "/logged".to_string()
            }
        );
    }

    #[test]
    fn test_token_delivery_query_requires_frontend() {
        assert!(matches!(
            token_delivery(Some("query"), None),
            Err(ConfigError::Missing("FRONTEND_URI"))
        ));

        let delivery = token_delivery(Some("QUERY"), Some("http://localhost:3000/app")).unwrap();
        match delivery {
            TokenDelivery::Query { frontend_uri } => {
                assert_eq!(frontend_uri.as_str(), "http://localhost:3000/app")
            }
            other => panic!("unexpected delivery: {:?}", other),
        }
    }

    #[test]
    fn test_token_delivery_rejects_unknown_mode() {
        assert!(matches!(
            token_delivery(Some("header"), None),
            Err(ConfigError::Invalid {
                var: "TOKEN_DELIVERY",
                ..
            })
        ));
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new("cid", "secret", "http://localhost:8888/callback");
        assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.scopes.len(), 3);
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }
}
