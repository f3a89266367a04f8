//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to the destination for the client's platform.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the record (cache, then store)
/// 2. Classify the client from its `User-Agent`
/// 3. Pick the target: universal link, intent URL, store or website
/// 4. Queue a click event for the background worker
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the store fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let decision = state.redirect_service.resolve(&code, user_agent).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, decision.location)]))
}
