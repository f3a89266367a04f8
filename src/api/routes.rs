//! API route configuration.

use crate::api::handlers::{
    apple_app_site_association_handler, assetlinks_handler, create_link_handler, deeplink_handler,
    info_handler, list_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Admin routes, protected by HTTP Basic authentication.
///
/// # Endpoints
///
/// - `POST /create` - Create a link record
/// - `GET  /links`  - List link records, newest first
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_link_handler))
        .route("/links", get(list_links_handler))
}

/// Public read-only lookups.
///
/// # Endpoints
///
/// - `GET /info/{code}`     - Stored record with short URL and deep link
/// - `GET /deeplink/{code}` - Synthesized deep link
pub fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/info/{code}", get(info_handler))
        .route("/deeplink/{code}", get(deeplink_handler))
}

/// App association files consumed by iOS and Android.
pub fn well_known_routes() -> Router<AppState> {
    Router::new()
        .route("/assetlinks.json", get(assetlinks_handler))
        .route(
            "/apple-app-site-association",
            get(apple_app_site_association_handler),
        )
}
