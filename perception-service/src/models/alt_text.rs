use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Generated description for an image, keyed by its URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AltTextCacheEntry {
    pub id: String,
    pub image_url: String,
    pub alt_text: String,
    pub created_at: DateTime<Utc>,
}

impl AltTextCacheEntry {
    pub fn new(image_url: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image_url: image_url.into(),
            alt_text: alt_text.into(),
            created_at: Utc::now(),
        }
    }
}
