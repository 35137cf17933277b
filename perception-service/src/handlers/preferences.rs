use crate::dtos::{FontSizeRequest, FontSizeResponse};
use crate::models::{UserPreferences, UserPreferencesUpdate};
use crate::services::font_size;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserPreferences>, AppError> {
    let preferences = state.preferences.get_or_create(&user_id).await?;
    Ok(Json(preferences))
}

pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(update): ValidatedJson<UserPreferencesUpdate>,
) -> Result<Json<UserPreferences>, AppError> {
    let preferences = state.preferences.upsert(&user_id, update).await?;

    tracing::info!(user_id = %user_id, "Preferences updated");

    Ok(Json(preferences))
}

pub async fn get_font_size(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<FontSizeResponse>, AppError> {
    let font_size = state
        .preferences
        .get_or_create(&user_id)
        .await?
        .font_size_percent();

    Ok(Json(FontSizeResponse {
        font_size,
        previous_size: None,
        action: None,
        percentage: font_size::percentage_label(font_size),
    }))
}

pub async fn adjust_font_size(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedJson(req): ValidatedJson<FontSizeRequest>,
) -> Result<Json<FontSizeResponse>, AppError> {
    let previous = state
        .preferences
        .get_or_create(&user_id)
        .await?
        .font_size_percent();
    let next = font_size::apply(previous, req.action, req.value);

    state
        .preferences
        .update(&user_id, UserPreferencesUpdate::font_size(next))
        .await?;

    tracing::info!(
        user_id = %user_id,
        action = ?req.action,
        previous,
        next,
        "Font size adjusted"
    );

    Ok(Json(FontSizeResponse {
        font_size: next,
        previous_size: Some(previous),
        action: Some(req.action),
        percentage: font_size::percentage_label(next),
    }))
}
