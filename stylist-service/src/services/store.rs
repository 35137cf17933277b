use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{FontFamily, FontPreference, FontPreferenceUpdate};

#[async_trait]
pub trait FontPreferenceStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<FontPreference>, AppError>;

    /// The most recently created preference, unless it was deleted.
    async fn current(&self) -> Result<Option<FontPreference>, AppError>;

    /// Store a new preference and make it current.
    async fn create(
        &self,
        font_family: FontFamily,
        font_size: u32,
    ) -> Result<FontPreference, AppError>;

    /// `None` when no preference has this id.
    async fn update(
        &self,
        id: &str,
        update: FontPreferenceUpdate,
    ) -> Result<Option<FontPreference>, AppError>;

    /// Returns whether a preference was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[derive(Default)]
struct Inner {
    preferences: HashMap<String, FontPreference>,
    current_id: Option<String>,
}

/// Process-local store; the map and the current pointer share one lock.
#[derive(Default)]
pub struct InMemoryFontPreferenceStore {
    inner: RwLock<Inner>,
}

impl InMemoryFontPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FontPreferenceStore for InMemoryFontPreferenceStore {
    async fn get(&self, id: &str) -> Result<Option<FontPreference>, AppError> {
        Ok(self.inner.read().await.preferences.get(id).cloned())
    }

    async fn current(&self) -> Result<Option<FontPreference>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .current_id
            .as_ref()
            .and_then(|id| inner.preferences.get(id))
            .cloned())
    }

    async fn create(
        &self,
        font_family: FontFamily,
        font_size: u32,
    ) -> Result<FontPreference, AppError> {
        let preference = FontPreference::new(font_family, font_size);

        let mut inner = self.inner.write().await;
        inner
            .preferences
            .insert(preference.id.clone(), preference.clone());
        inner.current_id = Some(preference.id.clone());

        Ok(preference)
    }

    async fn update(
        &self,
        id: &str,
        update: FontPreferenceUpdate,
    ) -> Result<Option<FontPreference>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.preferences.get_mut(id).map(|preference| {
            preference.apply(update);
            preference.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let removed = inner.preferences.remove(id).is_some();
        if removed && inner.current_id.as_deref() == Some(id) {
            inner.current_id = None;
        }
        Ok(removed)
    }
}
