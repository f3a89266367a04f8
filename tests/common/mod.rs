#![allow(dead_code)]

use axum::extract::Request;
use axum::{Router, ServiceExt, middleware, routing::get};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use dynamic_links::api::handlers::{health_handler, redirect_handler};
use dynamic_links::api::middleware::auth;
use dynamic_links::api::routes::{admin_routes, lookup_routes, well_known_routes};
use dynamic_links::config::{AdminCredentials, LinkSettings, WellKnownSettings};
use dynamic_links::domain::click_event::ClickEvent;
use dynamic_links::domain::destination::AppIdentity;
use dynamic_links::domain::entities::{Link, NewLink};
use dynamic_links::domain::repositories::LinkRepository;
use dynamic_links::infrastructure::cache::NullCache;
use dynamic_links::infrastructure::persistence::MemoryLinkRepository;
use dynamic_links::routes::app_router;
use dynamic_links::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// `Authorization` value for admin:secret.
pub const ADMIN_AUTH: &str = "Basic YWRtaW46c2VjcmV0";

pub const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
pub const ANDROID_UA: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";
pub const DESKTOP_UA: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0) AppleWebKit/605.1.15 Version/17.0 Safari/605.1.15";

pub fn link_settings() -> LinkSettings {
    LinkSettings {
        base_url: "https://go.trii.co".to_string(),
        website_url: "https://trii.co".to_string(),
        app: AppIdentity {
            scheme: "triiapp".to_string(),
            path_marker: "/app/".to_string(),
            android_package: "com.triico.app".to_string(),
        },
        ios_store_url: "https://apps.apple.com/co/app/trii/id1513826307".to_string(),
        android_store_url: "https://play.google.com/store/apps/details?id=com.triico.app&hl=en"
            .to_string(),
    }
}

pub fn well_known_settings() -> WellKnownSettings {
    WellKnownSettings {
        ios_app_id: "TEAM123.com.trii.app".to_string(),
        android_package: "com.triico.app".to_string(),
        android_sha256_fingerprints: vec!["AA:BB:CC".to_string()],
        app_name: "android_app".to_string(),
    }
}

pub fn create_test_state() -> (
    AppState,
    Arc<MemoryLinkRepository>,
    mpsc::Receiver<ClickEvent>,
) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        repo.clone(),
        Arc::new(NullCache::new()),
        tx,
        link_settings(),
        AdminCredentials {
            username: "admin".to_string(),
            password: "secret".to_string(),
        },
        well_known_settings(),
    );

    (state, repo, rx)
}

/// Directory shipped with the crate for `STATIC_DIR`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

/// Serves the production router over a real socket, so rate limiting sees
/// the peer address exactly as it does in `server::run`.
pub fn app_server(state: AppState) -> TestServer {
    let app = app_router(state, false, STATIC_DIR);
    TestServer::new(ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app))
        .unwrap()
}

/// Every route of the service except rate limiting, which needs a peer address.
pub fn test_router(state: AppState) -> Router {
    let admin =
        admin_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .merge(lookup_routes())
        .nest("/admin", admin)
        .nest("/.well-known", well_known_routes())
        .with_state(state)
}

pub async fn create_test_link(
    repo: &MemoryLinkRepository,
    id: &str,
    universal_link: Option<&str>,
    deep_link: Option<&str>,
) -> Link {
    create_test_link_at(repo, id, universal_link, deep_link, Utc::now()).await
}

pub async fn create_test_link_at(
    repo: &MemoryLinkRepository,
    id: &str,
    universal_link: Option<&str>,
    deep_link: Option<&str>,
    created_at: DateTime<Utc>,
) -> Link {
    repo.create(NewLink {
        id: id.to_string(),
        universal_link: universal_link.map(str::to_string),
        deep_link: deep_link.map(str::to_string),
        ios_store: "https://apps.apple.com/co/app/trii/id1513826307".to_string(),
        android_store: "https://play.google.com/store/apps/details?id=com.triico.app&hl=en"
            .to_string(),
        title: None,
        description: None,
        created_at,
    })
    .await
    .unwrap()
}
