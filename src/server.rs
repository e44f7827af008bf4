use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{Res, api, config::Config, info, spotify::Spotify, warning};

/// Shared by every handler. Holds configuration and the upstream client only;
/// there is no per-user state on the server.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub spotify: Spotify,
}

impl AppState {
    pub fn new(config: Config) -> Res<Self> {
        let spotify = Spotify::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            spotify,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let cors = cors_layer(state.config.frontend_origin.as_deref());

    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/refresh", get(api::refresh))
        .route("/tracks", get(api::tracks))
        .route("/artists", get(api::artists))
        .route_service("/logged", ServeFile::new(static_dir.join("logged.html")))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };

    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(e) => {
            warning!("Ignoring invalid FRONTEND_ORIGIN {:?}: {}", origin, e);
            CorsLayer::permissive()
        }
    }
}

/// Binds the configured address and prepares the shared state.
pub async fn bind(config: Config) -> Res<(TcpListener, AppState)> {
    let addr = SocketAddr::from_str(&config.server_addr)?;
    let state = AppState::new(config)?;

    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    Ok((listener, state))
}

pub async fn serve(listener: TcpListener, state: AppState) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn start_api_server(config: Config) -> Res<()> {
    let (listener, state) = bind(config).await?;
    serve(listener, state).await
}
