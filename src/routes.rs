//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`           - Platform-aware redirect (public)
//! - `GET  /info/{code}`      - Link record lookup (public)
//! - `GET  /deeplink/{code}`  - Deep link lookup (public)
//! - `GET  /health`           - Health check: store, cache, click queue (public)
//! - `/admin/*`               - Link management (HTTP Basic)
//! - `/.well-known/*`         - App association files
//! - `GET  /robots.txt`       - Crawler rules from the static directory
//! - `/static/*`              - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - HTTP Basic on `/admin`
//! - **CORS** - Any origin may call the read-only JSON endpoints
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
/// - `static_dir` - directory served under `/static`; its `robots.txt` is
///   also answered at the site root
pub fn app_router(state: AppState, behind_proxy: bool, static_dir: &str) -> NormalizePath<Router> {
    let admin_router = api::routes::admin_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let admin_router = rate_limit::apply(admin_router, rate_limit::SECURE, behind_proxy);

    let public_router = Router::new()
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::lookup_routes());
    let public_router = rate_limit::apply(public_router, rate_limit::PUBLIC, behind_proxy);

    let router = Router::new()
        .merge(public_router)
        .route("/health", get(health_handler))
        .route_service(
            "/robots.txt",
            ServeFile::new(Path::new(static_dir).join("robots.txt")),
        )
        .nest("/admin", admin_router)
        .nest("/.well-known", api::routes::well_known_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
