//! Storage abstractions for preferences, conversations and the alt-text cache.
//!
//! Handlers only see these traits; [`memory`] provides the process-local
//! implementation used by the service.

pub mod memory;

pub use memory::{InMemoryAltTextStore, InMemoryConversationStore, InMemoryPreferenceStore};

use crate::models::{
    AltTextCacheEntry, ChatConversation, ChatMessage, UserPreferences, UserPreferencesUpdate,
};
use async_trait::async_trait;
use service_core::error::AppError;

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<UserPreferences>, AppError>;

    /// Insert a record built from defaults plus `fields`. An existing record
    /// for the same user is returned untouched.
    async fn create(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError>;

    /// Merge `fields` into an existing record; `NotFound` when absent.
    async fn update(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError>;

    /// Return the stored record, creating a default one on first access.
    async fn get_or_create(&self, user_id: &str) -> Result<UserPreferences, AppError>;

    /// Merge into the existing record or create one from `fields`.
    async fn upsert(
        &self,
        user_id: &str,
        fields: UserPreferencesUpdate,
    ) -> Result<UserPreferences, AppError>;
}

#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<ChatConversation>, AppError>;

    /// Conversations owned by `user_id`, oldest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ChatConversation>, AppError>;

    async fn create(
        &self,
        user_id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatConversation, AppError>;

    /// Append `messages` in one step; `NotFound` when the id is unknown.
    async fn append(
        &self,
        id: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<ChatConversation, AppError>;
}

#[async_trait]
pub trait AltTextStore: Send + Sync {
    async fn get(&self, image_url: &str) -> Result<Option<AltTextCacheEntry>, AppError>;

    /// Cache a description. The first entry stored for a URL wins.
    async fn put(&self, image_url: &str, alt_text: &str) -> Result<AltTextCacheEntry, AppError>;
}
