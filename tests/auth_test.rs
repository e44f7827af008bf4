use std::collections::HashMap;

use mockito::{Matcher, Server, ServerGuard};
use topspot::{
    config::Config,
    error::AuthError,
    spotify::{Spotify, basic_auth_header, build_authorize_url, verify_state},
    types::TokenPair,
};
use url::Url;

const REDIRECT_URI: &str = "http://localhost:8888/callback";
const BASIC: &str = "Basic Y2lkOnNlY3JldA==";

fn spotify_for(server: &ServerGuard) -> Spotify {
    let mut config = Config::new("cid", "secret", REDIRECT_URI);
    config.token_url = format!("{}/api/token", server.url());
    config.api_url = format!("{}/v1", server.url());
    Spotify::new(&config).unwrap()
}

fn query_map(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

#[test]
fn test_build_authorize_url() {
    let base = Url::parse("https://accounts.spotify.com/authorize").unwrap();
    let url = build_authorize_url(
        &base,
        "cid",
        "http://x/callback",
        &["user-read-email", "user-top-read"],
        "S1",
    );

    assert_eq!(url.host_str(), Some("accounts.spotify.com"));
    assert_eq!(url.path(), "/authorize");

    let expected: HashMap<String, String> = [
        ("response_type", "code"),
        ("client_id", "cid"),
        ("scope", "user-read-email user-top-read"),
        ("redirect_uri", "http://x/callback"),
        ("state", "S1"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(query_map(&url), expected);
}

#[test]
fn test_build_authorize_url_keeps_scope_order() {
    let base = Url::parse("https://accounts.spotify.com/authorize").unwrap();
    let url = build_authorize_url(&base, "cid", "http://x/callback", &["b", "a", "c"], "S");
    assert_eq!(query_map(&url)["scope"], "b a c");
}

#[test]
fn test_basic_auth_header() {
    assert_eq!(basic_auth_header("cid", "secret"), BASIC);
}

#[test]
fn test_verify_state() {
    assert_eq!(verify_state(Some("S"), Some("S")), Ok(()));
    assert_eq!(verify_state(Some("A"), Some("B")), Err(AuthError::StateMismatch));
    assert_eq!(verify_state(None, Some("S")), Err(AuthError::StateMismatch));
    assert_eq!(verify_state(Some("S"), None), Err(AuthError::StateMismatch));
    assert_eq!(verify_state(None, None), Err(AuthError::StateMismatch));

    // Empty values count as absent
    assert_eq!(verify_state(Some(""), Some("")), Err(AuthError::StateMismatch));
    assert_eq!(verify_state(Some(""), None), Err(AuthError::StateMismatch));
}

#[tokio::test]
async fn test_callback_state_mismatch_skips_token_endpoint() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/token")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    let result = spotify
        .handle_callback(Some("CODE"), Some("A"), Some("B"))
        .await;

    assert_eq!(result, Err(AuthError::StateMismatch));
    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_callback_exchanges_code() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/token")
        .match_header("authorization", BASIC)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("code".into(), "CODE".into()),
            Matcher::UrlEncoded("redirect_uri".into(), REDIRECT_URI.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"AT","token_type":"Bearer","scope":"user-top-read","expires_in":3600,"refresh_token":"RT"}"#)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    let tokens = spotify
        .handle_callback(Some("CODE"), Some("S"), Some("S"))
        .await
        .unwrap();

    assert_eq!(
        tokens,
        TokenPair {
            access_token: "AT".to_string(),
            refresh_token: "RT".to_string(),
        }
    );
    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_callback_upstream_rejection() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"invalid_grant","error_description":"Invalid authorization code"}"#)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    let result = spotify
        .handle_callback(Some("CODE"), Some("S"), Some("S"))
        .await;

    assert_eq!(result, Err(AuthError::TokenExchangeFailed));
}

#[tokio::test]
async fn test_callback_without_code_is_passed_through() {
    let mut server = Server::new_async().await;
    // Only grant type and redirect uri go out when the code is absent
    let token_mock = server
        .mock("POST", "/api/token")
        .match_body(
            "grant_type=authorization_code&redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fcallback",
        )
        .with_status(400)
        .with_body(r#"{"error":"invalid_request"}"#)
        .expect(1)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    let result = spotify.handle_callback(None, Some("S"), Some("S")).await;

    assert_eq!(result, Err(AuthError::TokenExchangeFailed));
    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_callback_with_empty_code_omits_code() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/token")
        .match_body(
            "grant_type=authorization_code&redirect_uri=http%3A%2F%2Flocalhost%3A8888%2Fcallback",
        )
        .with_status(400)
        .with_body(r#"{"error":"invalid_request"}"#)
        .expect(1)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    let result = spotify.handle_callback(Some(""), Some("S"), Some("S")).await;

    assert_eq!(result, Err(AuthError::TokenExchangeFailed));
    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_exchange_without_refresh_token_fails() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"AT","expires_in":3600}"#)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    assert_eq!(
        spotify.exchange_code(Some("CODE")).await,
        Err(AuthError::TokenExchangeFailed)
    );
}

#[tokio::test]
async fn test_unreachable_token_endpoint() {
    let mut config = Config::new("cid", "secret", REDIRECT_URI);
    // Nothing listens on the discard port
    config.token_url = "http://127.0.0.1:9/api/token".to_string();
    let spotify = Spotify::new(&config).unwrap();

    assert_eq!(
        spotify.exchange_code(Some("CODE")).await,
        Err(AuthError::TokenExchangeFailed)
    );
}

#[tokio::test]
async fn test_refresh_access_token() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/token")
        .match_header("authorization", BASIC)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "RT".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"NEW","token_type":"Bearer","expires_in":3600}"#)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    assert_eq!(spotify.refresh_access_token("RT").await, Ok("NEW".to_string()));
    token_mock.assert_async().await;
}

#[tokio::test]
async fn test_refresh_access_token_failure() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;

    let spotify = spotify_for(&server);
    assert_eq!(
        spotify.refresh_access_token("revoked").await,
        Err(AuthError::TokenExchangeFailed)
    );
}

#[test]
fn test_authorize_url_uses_configured_scopes() {
    let config = Config::new("cid", "secret", REDIRECT_URI);
    let spotify = Spotify::new(&config).unwrap();

    let url = spotify.authorize_url("STATE");
    let params = query_map(&url);
    assert_eq!(params["scope"], "user-read-private user-read-email user-top-read");
    assert_eq!(params["state"], "STATE");
    assert_eq!(params["redirect_uri"], REDIRECT_URI);
}

#[test]
fn test_invalid_auth_url_is_rejected() {
    let mut config = Config::new("cid", "secret", REDIRECT_URI);
    config.auth_url = "not a url".to_string();
    assert!(Spotify::new(&config).is_err());
}
