use axum::{extract::State, response::Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{STATE_KEY, found};
use crate::{
    info,
    server::AppState,
    utils::{self, STATE_LENGTH},
};

/// Starts a login: stores a fresh state in a session cookie and redirects to
/// the authorize page carrying the same state.
pub async fn login(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let auth_state = utils::generate_random_state(STATE_LENGTH);
    let authorize_url = state.spotify.authorize_url(&auth_state);

    let cookie = Cookie::build((STATE_KEY, auth_state))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    info!("Redirecting to Spotify authorization");
    (jar.add(cookie), found(authorize_url.as_str()))
}
