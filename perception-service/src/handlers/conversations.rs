use crate::models::ChatConversation;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;

pub async fn list_conversations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChatConversation>>, AppError> {
    let conversations = state.conversations.list_by_user(&user_id).await?;
    Ok(Json(conversations))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<ChatConversation>, AppError> {
    let conversation = state
        .conversations
        .get(&conversation_id)
        .await?
        .ok_or_else(|| AppError::not_found("Conversation not found"))?;
    Ok(Json(conversation))
}
