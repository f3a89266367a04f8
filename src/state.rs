//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService};
use crate::config::{AdminCredentials, LinkSettings, WellKnownSettings};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::CacheService;

/// Services and settings shared by all requests.
///
/// Cloning is cheap: every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub redirect_service: Arc<RedirectService<dyn LinkRepository>>,
    pub admin: Arc<AdminCredentials>,
    pub well_known: Arc<WellKnownSettings>,
}

impl AppState {
    /// Wires the services around one repository, cache and click channel.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheService>,
        click_sender: mpsc::Sender<ClickEvent>,
        links: LinkSettings,
        admin: AdminCredentials,
        well_known: WellKnownSettings,
    ) -> Self {
        let link_service = Arc::new(LinkService::new(repository.clone(), links.clone()));
        let redirect_service = Arc::new(RedirectService::new(
            repository,
            cache,
            click_sender,
            links,
        ));

        Self {
            link_service,
            redirect_service,
            admin: Arc::new(admin),
            well_known: Arc::new(well_known),
        }
    }
}
