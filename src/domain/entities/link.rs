//! Link entity: a short code and its platform-specific destinations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link.
///
/// `universal_link` and `deep_link` are both optional at the type level; the
/// creation path guarantees at least one of them is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Link {
    pub id: String,
    pub universal_link: Option<String>,
    pub deep_link: Option<String>,
    pub ios_store: String,
    pub android_store: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub click_count: i64,
}

impl Link {
    /// Builds the stored representation of a freshly created link.
    pub fn from_new(new_link: NewLink) -> Self {
        Self {
            id: new_link.id,
            universal_link: new_link.universal_link,
            deep_link: new_link.deep_link,
            ios_store: new_link.ios_store,
            android_store: new_link.android_store,
            title: new_link.title,
            description: new_link.description,
            created_at: new_link.created_at,
            updated_at: new_link.created_at,
            click_count: 0,
        }
    }

    pub fn universal_link(&self) -> Option<&str> {
        self.universal_link.as_deref()
    }

    pub fn deep_link(&self) -> Option<&str> {
        self.deep_link.as_deref()
    }
}

/// Input data for persisting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub id: String,
    pub universal_link: Option<String>,
    pub deep_link: Option<String>,
    pub ios_store: String,
    pub android_store: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
