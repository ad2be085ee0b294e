//! Handler for the link creation endpoint.

use axum::{
    Json,
    body::Bytes,
    extract::{ConnectInfo, State},
    http::HeaderMap,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::api::dto::create::{CreateRequest, CreateResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::forwarded_for;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST <base-path>_create`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://lemurs.win", "secret": "..." }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "https://mtrx.to/AbCd-_12" }
/// ```
///
/// # Errors
///
/// - 400 if the body is not valid JSON
/// - 401 if the secret is missing or wrong (counted in the auth error counter)
/// - 400 if `long_url` does not start with `https://` or exceeds the length limit
/// - 500 if no short path could be generated
pub async fn create_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CreateResponse>, AppError> {
    let payload: CreateRequest = serde_json::from_slice(&body).map_err(|e| {
        info!(error = %e, "Got bad json");
        AppError::bad_request("Error decoding json", json!({ "reason": e.to_string() }))
    })?;

    if !payload.has_secret(&state.settings.secret) {
        state.stats.record_auth_error();
        warn!(client = %addr.ip(), "Refusing to create link with wrong secret");
        return Err(AppError::unauthorized(
            "Must specify correct secret",
            json!({}),
        ));
    }

    if let Err(e) = payload.validate_long_url(state.settings.length_limit) {
        info!(url = %payload.long_url, reason = %e, "Refusing to create link");
        return Err(e);
    }

    let short_path = state
        .link_service
        .generate_short_path(
            &payload.long_url,
            &addr.ip().to_string(),
            &forwarded_for(&headers),
        )
        .await?;

    Ok(Json(CreateResponse {
        short_url: state.settings.short_url(&short_path),
    }))
}
