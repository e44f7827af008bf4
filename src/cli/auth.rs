use url::Url;

use crate::{
    Res,
    config::Config,
    info,
    spotify::build_authorize_url,
    utils::{self, STATE_LENGTH},
};

/// Prints an authorize URL with a freshly generated state.
///
/// No cookie is involved, so a callback following this URL only succeeds
/// when the caller sets `spotify_auth_state` to the printed state.
pub fn authorize_url(config: &Config) -> Res<()> {
    let auth_url = Url::parse(&config.auth_url)?;
    let state = utils::generate_random_state(STATE_LENGTH);
    let url = build_authorize_url(
        &auth_url,
        &config.client_id,
        &config.redirect_uri,
        &config.scopes,
        &state,
    );

    info!("State: {}", state);
    println!("{}", url);
    Ok(())
}
