//! Handlers for link creation, listing and lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, DeepLinkResponse, LinkResponse};
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a link record.
///
/// # Endpoint
///
/// `POST /admin/create` (HTTP Basic authentication)
///
/// # Request Body
///
/// ```json
/// {
///   "universal_link": "https://trii.co/app/product?id=987",
///   "deep_link": "",
///   "title": "Spring promo"
/// }
/// ```
///
/// # Response
///
/// `201 Created` with the stored record, its `short_url` and the
/// synthesized `deeplink`.
///
/// # Errors
///
/// Returns 400 Bad Request if neither link is given or a URL is malformed.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state.link_service.create_link(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(enrich(&state, link))))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /admin/links` (HTTP Basic authentication)
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(
        links.into_iter().map(|link| enrich(&state, link)).collect(),
    ))
}

/// Returns the full stored record for a code.
///
/// # Endpoint
///
/// `GET /info/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn info_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(enrich(&state, link)))
}

/// Returns the synthesized deep link for a code, regardless of the caller's platform.
///
/// # Endpoint
///
/// `GET /deeplink/{code}`
///
/// # Response
///
/// ```json
/// {
///   "deeplink": "triiapp://product?id=987",
///   "universal_link": "https://trii.co/app/product?id=987",
///   "deep_link": null,
///   "title": null,
///   "description": null
/// }
/// ```
pub async fn deeplink_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeepLinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let deeplink = state.link_service.deep_link_for(&link);

    Ok(Json(DeepLinkResponse::new(deeplink, link)))
}

fn enrich(state: &AppState, link: Link) -> LinkResponse {
    LinkResponse {
        short_url: state.link_service.short_url(&link.id),
        deeplink: state.link_service.deep_link_for(&link),
        link,
    }
}
