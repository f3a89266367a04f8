//! Handlers for the app association files under `/.well-known`.

use axum::{Json, extract::State};

use crate::api::dto::well_known::{AppleAppSiteAssociation, AssetLinkStatement};
use crate::state::AppState;

/// Android Digital Asset Links.
///
/// # Endpoint
///
/// `GET /.well-known/assetlinks.json`
pub async fn assetlinks_handler(State(state): State<AppState>) -> Json<Vec<AssetLinkStatement>> {
    Json(vec![AssetLinkStatement::from_settings(&state.well_known)])
}

/// iOS universal link association.
///
/// # Endpoint
///
/// `GET /.well-known/apple-app-site-association`
pub async fn apple_app_site_association_handler(
    State(state): State<AppState>,
) -> Json<AppleAppSiteAssociation> {
    Json(AppleAppSiteAssociation::from_settings(&state.well_known))
}
