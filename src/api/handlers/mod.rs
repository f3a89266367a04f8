//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod well_known;

pub use health::health_handler;
pub use links::{create_link_handler, deeplink_handler, info_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use well_known::{apple_app_site_association_handler, assetlinks_handler};
