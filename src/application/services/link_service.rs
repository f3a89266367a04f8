//! Link creation and retrieval service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use url::Url;

use crate::config::LinkSettings;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CODE_LENGTH_BYTES, EntropySource, OsEntropy, generate_code};

/// Attempts at finding an unused code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Input for [`LinkService::create_link`].
///
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateLink {
    pub universal_link: Option<String>,
    pub deep_link: Option<String>,
    pub ios_store: Option<String>,
    pub android_store: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Service for creating and retrieving link records.
///
/// Handles input validation, store URL defaults and code generation with
/// collision retry.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    settings: LinkSettings,
    entropy: Arc<dyn EntropySource>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service using the operating system entropy source.
    pub fn new(repository: Arc<R>, settings: LinkSettings) -> Self {
        Self {
            repository,
            settings,
            entropy: Arc::new(OsEntropy),
        }
    }

    /// Replaces the entropy source used for code generation.
    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn settings(&self) -> &LinkSettings {
        &self.settings
    }

    /// Creates a link record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - neither a universal link nor a deep link is given
    /// - the universal link or a store URL is not an absolute http(s) URL
    ///
    /// Returns [`AppError::EntropySource`] if no code could be generated and
    /// [`AppError::Internal`] after too many collisions or on store errors.
    pub async fn create_link(&self, input: CreateLink) -> Result<Link, AppError> {
        let universal_link = non_empty(input.universal_link);
        let deep_link = non_empty(input.deep_link);

        if universal_link.is_none() && deep_link.is_none() {
            return Err(AppError::bad_request(
                "Either universal_link or deep_link is required",
                json!({ "fields": ["universal_link", "deep_link"] }),
            ));
        }

        if let Some(ref universal) = universal_link {
            require_http_url("universal_link", universal)?;
        }

        let ios_store =
            non_empty(input.ios_store).unwrap_or_else(|| self.settings.ios_store_url.clone());
        require_http_url("ios_store", &ios_store)?;

        let android_store = non_empty(input.android_store)
            .unwrap_or_else(|| self.settings.android_store_url.clone());
        require_http_url("android_store", &android_store)?;

        let id = self.generate_unique_code().await?;

        let new_link = NewLink {
            id,
            universal_link,
            deep_link,
            ios_store,
            android_store,
            title: non_empty(input.title),
            description: non_empty(input.description),
            created_at: Utc::now(),
        };

        let link = self.repository.create(new_link).await?;
        tracing::info!(id = %link.id, "Link created");
        Ok(link)
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link(&self, id: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))
    }

    /// Returns every link, newest first.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.repository.list().await
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), id)
    }

    /// Synthesized app-scheme deep link for a record.
    pub fn deep_link_for(&self, link: &Link) -> String {
        self.settings
            .app
            .deep_link(link.deep_link(), link.universal_link())
    }

    /// Generates a code not yet used by any record.
    ///
    /// Attempts up to [`MAX_CODE_ATTEMPTS`] times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code(self.entropy.as_ref(), CODE_LENGTH_BYTES)?;

            if self.repository.find_by_id(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::debug!(code = %code, "Generated code already in use");
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_http_url(field: &str, value: &str) -> Result<(), AppError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            format!("{field} must be an absolute http(s) URL"),
            json!({ "field": field, "value": value }),
        ))
    }
}
