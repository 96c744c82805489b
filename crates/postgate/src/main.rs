//! HTTP front end for the postgate mail submission service.
//!
//! Exposes `POST /send`: bearer-token authenticated, JSON in, JSON out.
//! Everything protocol-related happens in `postgate-core`; this binary only
//! maps HTTP to the send operation and back.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

use postgate_core::{EmailMessage, TransportConfig, send_email};

/// Shared state: the expected bearer secret and the resolved relay config.
struct AppState {
    token: String,
    smtp: TransportConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token =
        env::var("POSTGATE_AUTH_TOKEN").context("POSTGATE_AUTH_TOKEN must be set")?;
    let addr: SocketAddr = env::var("POSTGATE_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()
        .context("invalid POSTGATE_ADDR")?;

    let state = Arc::new(AppState {
        token,
        smtp: postgate_core::config::from_env(),
    });
    info!(host = %state.smtp.host, port = state.smtp.port, "relay configured");

    let app = Router::new()
        .route("/send", post(handle_send))
        .with_state(state);

    info!(%addr, "listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

/// `POST /send`: authenticate, parse, delegate, map the outcome.
///
/// The bearer check runs before the body is even looked at; parse failures
/// never reach the send service.
async fn handle_send(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    payload: Result<Json<EmailMessage>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Some(token) = bearer_token(&headers) else {
        return reject(StatusCode::UNAUTHORIZED, "missing bearer token");
    };
    if token != state.token {
        return reject(StatusCode::FORBIDDEN, "invalid bearer token");
    }

    let Json(message) = match payload {
        Ok(json) => json,
        Err(rejection) => return reject(StatusCode::BAD_REQUEST, &rejection.to_string()),
    };

    let outcome = send_email(&state.smtp, &message).await;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(serde_json::to_value(&outcome).unwrap_or_default()),
    )
}

/// Extracts the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Uniform error body for the front end's own validation failures.
fn reject(status: StatusCode, error: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": error })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer s3cret"),
        );
        assert_eq!(bearer_token(&headers), Some("s3cret"));
    }

    #[test]
    fn missing_or_malformed_authorization_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn reject_carries_the_error_string() {
        let (status, Json(body)) = reject(StatusCode::FORBIDDEN, "invalid bearer token");
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "invalid bearer token");
    }
}
