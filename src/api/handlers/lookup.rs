//! Handler for short link redirects.

use axum::{
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use tracing::{debug, error};

use crate::domain::follow_event::FollowEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::forwarded_for;

/// Redirects a short path to its long URL.
///
/// # Endpoint
///
/// `GET <base-path><short_path>`
///
/// # Request Flow
///
/// 1. Strip the base path from the request path
/// 2. Look up the link
/// 3. Queue a follow event on the follow recorder
/// 4. Return 302 Found with `Location` set to the long URL
///
/// The follow row is written later by the background worker. Queueing only
/// waits when the follow queue is full.
///
/// # Errors
///
/// Returns 404 Not Found if the path is outside the base path or no link
/// exists. No follow is recorded in that case.
/// Returns 500 Internal Server Error on any other storage error.
pub async fn lookup_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response, AppError> {
    let Some(short_path) = uri.path().strip_prefix(state.settings.base_path()) else {
        debug!(path = %uri.path(), "Request outside base path");
        return Err(AppError::not_found("Link not found", json!({})));
    };

    let link = match state.link_service.resolve(short_path).await {
        Ok(Some(link)) => link,
        Ok(None) => {
            return Err(AppError::not_found(
                "Link not found",
                json!({ "short_path": short_path }),
            ));
        }
        Err(e) => {
            error!(error = %e, short_path = %short_path, "Unknown DB error");
            return Err(AppError::internal("Internal server error", json!({})));
        }
    };

    let location = HeaderValue::from_str(&link.long_url).map_err(|e| {
        error!(error = %e, short_path = %short_path, "Stored link is not a valid header value");
        AppError::internal("Internal server error", json!({}))
    })?;

    state
        .follow_recorder
        .record(FollowEvent::new(
            link.short_path,
            Utc::now().timestamp(),
            addr.ip().to_string(),
            forwarded_for(&headers),
        ))
        .await;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
