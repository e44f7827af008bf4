use std::collections::HashMap;

use axum::extract::{Query, State};
use axum_extra::extract::cookie::CookieJar;

use super::{REFRESH_TOKEN_KEY, token_param};
use crate::{
    error::{AuthError, TokenKind},
    server::AppState,
};

/// `GET /refresh?refresh_token=` answers with the new access token as text.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, AuthError> {
    let refresh_token = token_param(&params, &jar, REFRESH_TOKEN_KEY)
        .ok_or(AuthError::MissingToken(TokenKind::Refresh))?;

    state.spotify.refresh_access_token(&refresh_token).await
}
