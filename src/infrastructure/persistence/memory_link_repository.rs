//! In-process implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link repository backed by a `HashMap` behind an async `RwLock`.
///
/// Used when no database is configured and by the HTTP integration tests.
/// Data does not survive a restart. Increments take the write lock, so
/// concurrent clicks are never lost.
#[derive(Default)]
pub struct MemoryLinkRepository {
    links: RwLock<HashMap<String, Link>>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_pkey" }),
            ));
        }

        let link = Link::from_new(new_link);
        links.insert(link.id.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.read().await.get(id).cloned())
    }

    async fn increment_click(&self, id: &str) -> Result<(), AppError> {
        let mut links = self.links.write().await;

        match links.get_mut(id) {
            Some(link) => {
                link.click_count += 1;
                Ok(())
            }
            None => Err(AppError::not_found("Link not found", json!({ "id": id }))),
        }
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.links.read().await.values().cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
