//! Redirect resolution: lookup, platform classification, target selection
//! and click accounting.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

use crate::config::LinkSettings;
use crate::domain::click_event::ClickEvent;
use crate::domain::destination::{RedirectDecision, select_target};
use crate::domain::entities::Link;
use crate::domain::platform::Platform;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Resolves short codes into redirect targets.
///
/// The response never waits on the click counter: the increment is handed to
/// the background worker through a bounded channel.
pub struct RedirectService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    click_sender: mpsc::Sender<ClickEvent>,
    settings: LinkSettings,
}

impl<R: LinkRepository + ?Sized + 'static> RedirectService<R> {
    pub fn new(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            repository,
            cache,
            click_sender,
            settings,
        }
    }

    /// Resolves `code` for a client with the given user agent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::Internal`] when the store fails. A full click queue is not
    /// an error.
    pub async fn resolve(
        &self,
        code: &str,
        user_agent: Option<&str>,
    ) -> Result<RedirectDecision, AppError> {
        let link = self.lookup(code).await?;

        let platform = Platform::detect(user_agent);
        let decision = select_target(
            &link,
            platform,
            &self.settings.app,
            &self.settings.website_url,
        );

        metrics::counter!("redirects_total", "platform" => platform.as_str()).increment(1);
        debug!(code = %code, platform = %platform, location = %decision.location, "Redirect resolved");

        self.record_click(ClickEvent::new(link.id, platform, user_agent));

        Ok(decision)
    }

    /// Number of click events the queue can still accept.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    pub fn click_queue_is_closed(&self) -> bool {
        self.click_sender.is_closed()
    }

    pub async fn cache_is_healthy(&self) -> bool {
        self.cache.health_check().await
    }

    /// Cache first, then the store. A store hit refills the cache in the background.
    async fn lookup(&self, code: &str) -> Result<Link, AppError> {
        match self.cache.get_link(code).await {
            Ok(Some(link)) => return Ok(link),
            Ok(None) => {}
            Err(e) => warn!(code = %code, error = %e, "Cache lookup failed, using store"),
        }

        let link = self
            .repository
            .find_by_id(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        let cache = self.cache.clone();
        let cached = link.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_link(&cached, None).await {
                warn!(code = %cached.id, error = %e, "Failed to populate cache");
            }
        });

        Ok(link)
    }

    fn record_click(&self, event: ClickEvent) {
        match self.click_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("click_events_dropped_total").increment(1);
                warn!(code = %event.code, "Click queue full, click dropped");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("click_events_dropped_total").increment(1);
                warn!(code = %event.code, "Click queue closed, click dropped");
            }
        }
    }
}
