use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, STATE_KEY, found};
use crate::{config::TokenDelivery, error::AuthError, server::AppState, types::TokenPair, warning};

/// Handles the redirect back from the authorize page.
///
/// A state mismatch answers `400 state_mismatch` and leaves every cookie as
/// it was. Once the state matches, the state cookie is cleared whatever the
/// exchange outcome, so a second callback with the same state is rejected.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let cookie_state = jar.get(STATE_KEY).map(|c| c.value().to_string());

    let result = state
        .spotify
        .handle_callback(
            params.get("code").map(String::as_str),
            params.get("state").map(String::as_str),
            cookie_state.as_deref(),
        )
        .await;

    match result {
        Err(AuthError::StateMismatch) => {
            warning!("Callback rejected: state mismatch");
            AuthError::StateMismatch.into_response()
        }
        Err(e) => (jar.remove(Cookie::build(STATE_KEY).path("/")), e).into_response(),
        Ok(tokens) => {
            let jar = jar.remove(Cookie::build(STATE_KEY).path("/"));
            deliver(&state.config.token_delivery, jar, tokens)
        }
    }
}

fn deliver(delivery: &TokenDelivery, jar: CookieJar, tokens: TokenPair) -> Response {
    match delivery {
        TokenDelivery::Cookie { landing } => {
            let jar = jar
                .add(token_cookie(ACCESS_TOKEN_KEY, tokens.access_token))
                .add(token_cookie(REFRESH_TOKEN_KEY, tokens.refresh_token));
            (jar, found(landing)).into_response()
        }
        TokenDelivery::Query { frontend_uri } => {
            let mut url = frontend_uri.clone();
            url.query_pairs_mut()
                .append_pair(ACCESS_TOKEN_KEY, &tokens.access_token)
                .append_pair(REFRESH_TOKEN_KEY, &tokens.refresh_token);
            (jar, found(url.as_str())).into_response()
        }
    }
}

// Not HttpOnly: the landing page script reads both tokens.
fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}
