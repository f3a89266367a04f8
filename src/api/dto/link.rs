//! DTOs for link creation, info and deep-link endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DeserializeAs, serde_as};
use validator::Validate;

use crate::application::services::CreateLink;
use crate::domain::entities::Link;

/// Trims string fields and turns blank ones into `None`.
pub struct BlankAsNone;

impl<'de> DeserializeAs<'de, Option<String>> for BlankAsNone {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }
}

/// Request body for `POST /admin/create`.
///
/// Blank strings deserialize to `None`, so form builders that send every
/// field are accepted. At least one of `universal_link` and `deep_link` must
/// be present; the service enforces that rule.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub universal_link: Option<String>,

    /// Custom-scheme link (`myapp://path`) or a bare in-app path.
    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub deep_link: Option<String>,

    /// App Store URL; the configured default applies when absent.
    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub ios_store: Option<String>,

    /// Play Store URL; the configured default applies when absent.
    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(url(message = "Invalid URL format"))]
    pub android_store: Option<String>,

    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: Option<String>,

    #[serde_as(as = "BlankAsNone")]
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(request: CreateLinkRequest) -> Self {
        Self {
            universal_link: request.universal_link,
            deep_link: request.deep_link,
            ios_store: request.ios_store,
            android_store: request.android_store,
            title: request.title,
            description: request.description,
        }
    }
}

/// Stored record enriched with its public short URL and synthesized deep link.
///
/// Returned by `POST /admin/create`, `GET /admin/links` and `GET /info/{code}`.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    #[serde(flatten)]
    pub link: Link,
    pub short_url: String,
    pub deeplink: String,
}

/// Response of `GET /deeplink/{code}`.
#[derive(Debug, Serialize)]
pub struct DeepLinkResponse {
    /// Synthesized app-scheme link, always present.
    pub deeplink: String,
    pub universal_link: Option<String>,
    pub deep_link: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl DeepLinkResponse {
    pub fn new(deeplink: String, link: Link) -> Self {
        Self {
            deeplink,
            universal_link: link.universal_link,
            deep_link: link.deep_link,
            title: link.title,
            description: link.description,
        }
    }
}
