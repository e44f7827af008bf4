use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::{ACCESS_TOKEN_KEY, token_param};
use crate::{
    error::{AuthError, TokenKind},
    server::AppState,
    types::{TopItemKind, TopItemsQuery},
    utils,
};

/// `GET /tracks?access_token=&time_range=&limit=`
pub async fn tracks(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AuthError> {
    top_items(&state, TopItemKind::Tracks, &jar, &params).await
}

/// `GET /artists?access_token=&time_range=&limit=`
pub async fn artists(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AuthError> {
    top_items(&state, TopItemKind::Artists, &jar, &params).await
}

async fn top_items(
    state: &AppState,
    kind: TopItemKind,
    jar: &CookieJar,
    params: &HashMap<String, String>,
) -> Result<Response, AuthError> {
    let access_token = token_param(params, jar, ACCESS_TOKEN_KEY)
        .ok_or(AuthError::MissingToken(TokenKind::Access))?;

    let query = TopItemsQuery {
        access_token,
        range: utils::parse_time_range(params.get("time_range").map(String::as_str)),
        limit: utils::parse_limit(params.get("limit").map(String::as_str)),
    };

    let body = state.spotify.fetch_top(kind, &query).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
