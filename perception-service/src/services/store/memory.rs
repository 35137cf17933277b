//! In-memory stores backed by `DashMap`.
//!
//! Every operation runs under a single shard lock, so get-or-create, upsert
//! and append are atomic with respect to concurrent requests.

use super::{AltTextStore, ConversationStore, PreferenceStore};
use crate::models::{
    AltTextCacheEntry, ChatConversation, ChatMessage, UserPreferences, UserPreferencesUpdate,
};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use service_core::error::AppError;

fn new_preferences(user_id: &str, fields: UserPreferencesUpdate) -> UserPreferences {
    let mut prefs = UserPreferences::new(user_id);
    prefs.apply(fields);
    prefs.updated_at = prefs.created_at;
    prefs
}

/// Preferences keyed by user id.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    records: DashMap<String, UserPreferences>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>, AppError> {
        Ok(self.records.get(user_id).map(|r| r.value().clone()))
    }

    async fn create(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError> {
        let record = self
            .records
            .entry(user_id.to_string())
            .or_insert_with(|| new_preferences(user_id, fields));
        Ok(record.value().clone())
    }

    async fn update(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError> {
        let mut record = self
            .records
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found("User preferences not found"))?;
        record.apply(fields);
        Ok(record.value().clone())
    }

    async fn get_or_create(&self, user_id: &str) -> Result<UserPreferences, AppError> {
        self.create(user_id, UserPreferencesUpdate::default()).await
    }

    async fn upsert(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError> {
        let record = match self.records.entry(user_id.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().apply(fields);
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                tracing::debug!(user_id, "Creating preferences from update");
                entry.insert(new_preferences(user_id, fields)).value().clone()
            }
        };
        Ok(record)
    }
}

/// Conversations keyed by conversation id.
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: DashMap<String, ChatConversation>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &str) -> Result<Option<ChatConversation>, AppError> {
        Ok(self.conversations.get(id).map(|c| c.value().clone()))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ChatConversation>, AppError> {
        let mut conversations: Vec<ChatConversation> = self
            .conversations
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.value().clone())
            .collect();
        conversations.sort_by_key(|c| c.created_at);
        Ok(conversations)
    }

    async fn create(
        &self,
        user_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatConversation, AppError> {
        let conversation = ChatConversation::new(user_id, messages);
        self.conversations
            .insert(conversation.id.clone(), conversation.clone());
        Ok(conversation)
    }

    async fn append(
        &self,
        id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatConversation, AppError> {
        let mut conversation = self
            .conversations
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Conversation not found"))?;
        conversation.append(messages);
        Ok(conversation.value().clone())
    }
}

/// Alt-text descriptions keyed by image URL.
#[derive(Default)]
pub struct InMemoryAltTextStore {
    entries: DashMap<String, AltTextCacheEntry>,
}

impl InMemoryAltTextStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AltTextStore for InMemoryAltTextStore {
    async fn get(&self, image_url: &str) -> Result<Option<AltTextCacheEntry>, AppError> {
        Ok(self.entries.get(image_url).map(|e| e.value().clone()))
    }

    async fn put(&self, image_url: &str, alt_text: &str) -> Result<AltTextCacheEntry, AppError> {
        let entry = self
            .entries
            .entry(image_url.to_string())
            .or_insert_with(|| AltTextCacheEntry::new(image_url, alt_text));
        Ok(entry.value().clone())
    }
}
