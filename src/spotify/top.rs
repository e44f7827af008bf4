use axum::body::Bytes;

use super::Spotify;
use crate::{
    error::{AuthError, TokenKind},
    types::{TimeRange, TopItemKind, TopItemsQuery},
    warning,
};

impl Spotify {
    /// Fetches the user's top tracks or artists and returns the body verbatim.
    ///
    /// An empty `access_token` fails with `MissingToken` before any request is
    /// made. `limit` is sent as given; callers keep it within `[0, 50]`.
    ///
    /// # Errors
    ///
    /// Any transport failure or non-2xx answer is reported as
    /// `MissingToken(Access)`; the upstream status is only logged.
    pub async fn fetch_top_items(
        &self,
        kind: TopItemKind,
        access_token: &str,
        range: TimeRange,
        limit: u8,
    ) -> Result<Bytes, AuthError> {
        if access_token.is_empty() {
            return Err(AuthError::MissingToken(TokenKind::Access));
        }

        let api_url = format!(
            "{uri}/me/top/{kind}",
            uri = self.api_url,
            kind = kind.path()
        );
        let limit = limit.to_string();

        let response = self
            .http
            .get(&api_url)
            .query(&[("time_range", range.as_str()), ("limit", limit.as_str())])
            .bearer_auth(access_token)
            .send()
            .await
            .and_then(|res| res.error_for_status());

        let response = match response {
            Ok(res) => res,
            Err(e) => {
                warning!("Top {} request failed: {}", kind.path(), e);
                return Err(AuthError::MissingToken(TokenKind::Access));
            }
        };

        response.bytes().await.map_err(|e| {
            warning!("Top {} body could not be read: {}", kind.path(), e);
            AuthError::MissingToken(TokenKind::Access)
        })
    }

    /// [`Spotify::fetch_top_items`] driven by a parsed query.
    pub async fn fetch_top(&self, kind: TopItemKind, query: &TopItemsQuery) -> Result<Bytes, AuthError> {
        self.fetch_top_items(kind, &query.access_token, query.range, query.limit)
            .await
    }
}
