use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, header::AUTHORIZATION};
use url::Url;

use super::Spotify;
use crate::{
    error::AuthError,
    success,
    types::{TokenPair, TokenResponse},
    warning,
};

/// Builds the accounts service authorize URL for the code flow.
///
/// Appends `response_type=code`, `client_id`, `scope` (space joined, in the
/// given order), `redirect_uri` and `state` to `auth_url`. No network call.
///
/// # Example
///
/// ```
/// let base = Url::parse("https://accounts.spotify.com/authorize")?;
/// let url = build_authorize_url(&base, "cid", "http://x/callback", &["user-top-read"], "S1");
/// ```
pub fn build_authorize_url<S: AsRef<str>>(
    auth_url: &Url,
    client_id: &str,
    redirect_uri: &str,
    scopes: &[S],
    state: &str,
) -> Url {
    let scope = scopes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");

    let mut url = auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("scope", &scope)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("state", state);
    url
}

/// Accepts a callback only when its `state` exactly equals the cookie value.
///
/// An empty value on either side counts as absent and is rejected.
pub fn verify_state(query_state: Option<&str>, cookie_state: Option<&str>) -> Result<(), AuthError> {
    match (query_state, cookie_state) {
        (Some(query), Some(cookie)) if !query.is_empty() && query == cookie => Ok(()),
        _ => Err(AuthError::StateMismatch),
    }
}

/// `Basic base64(client_id:client_secret)` for the token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

impl Spotify {
    /// Authorize URL for this client with the configured scopes.
    pub fn authorize_url(&self, state: &str) -> Url {
        build_authorize_url(
            &self.auth_url,
            &self.client_id,
            &self.redirect_uri,
            &self.scopes,
            state,
        )
    }

    /// Completes the callback step of the flow.
    ///
    /// The state check runs first; on mismatch the token endpoint is never
    /// contacted. A missing `code` is passed through to the upstream, which
    /// rejects the grant.
    pub async fn handle_callback(
        &self,
        code: Option<&str>,
        query_state: Option<&str>,
        cookie_state: Option<&str>,
    ) -> Result<TokenPair, AuthError> {
        verify_state(query_state, cookie_state)?;
        self.exchange_code(code).await
    }

    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// An empty `code` is left out of the form, same as an absent one.
    pub async fn exchange_code(&self, code: Option<&str>) -> Result<TokenPair, AuthError> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        if let Some(code) = code.filter(|c| !c.is_empty()) {
            form.push(("code", code));
        }

        let token = self.request_token(&form).await?;
        let Some(refresh_token) = token.refresh_token else {
            warning!("Token exchange failed: response carried no refresh token");
            return Err(AuthError::TokenExchangeFailed);
        };

        success!("Authorization code exchanged for tokens");
        Ok(TokenPair {
            access_token: token.access_token,
            refresh_token,
        })
    }

    /// Exchanges a refresh token for a new access token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, AuthError> {
        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let token = self.request_token(&form).await?;
        success!("Access token refreshed");
        Ok(token.access_token)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let res = self
            .http
            .post(&self.token_url)
            .header(
                AUTHORIZATION,
                basic_auth_header(&self.client_id, &self.client_secret),
            )
            .form(form)
            .send()
            .await
            .map_err(|e| {
                warning!("Token endpoint unreachable: {}", e);
                AuthError::TokenExchangeFailed
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            warning!("Token endpoint answered {}", status);
            return Err(AuthError::TokenExchangeFailed);
        }

        res.json::<TokenResponse>().await.map_err(|e| {
            warning!("Token endpoint sent an unreadable body: {}", e);
            AuthError::TokenExchangeFailed
        })
    }
}
