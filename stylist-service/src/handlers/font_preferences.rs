use crate::dtos::{CreateFontPreferenceRequest, UpdateFontPreferenceRequest};
use crate::models::FontPreference;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::extract::ValidatedJson;

fn preference_not_found() -> AppError {
    AppError::not_found("Font preference not found")
}

pub async fn get_current_font_preference(
    State(state): State<AppState>,
) -> Result<Json<FontPreference>, AppError> {
    let preference = state.store.current().await?.ok_or_else(|| {
        AppError::not_found("No font preferences found. Please create font preferences first")
    })?;
    Ok(Json(preference))
}

pub async fn get_font_preference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FontPreference>, AppError> {
    let preference = state
        .store
        .get(&id)
        .await?
        .ok_or_else(preference_not_found)?;
    Ok(Json(preference))
}

pub async fn create_font_preference(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateFontPreferenceRequest>,
) -> Result<(StatusCode, Json<FontPreference>), AppError> {
    let preference = state
        .store
        .create(req.font_family()?, req.font_size)
        .await?;

    tracing::info!(
        preference_id = %preference.id,
        font_family = %preference.font_family,
        font_size = preference.font_size,
        "Font preference created"
    );

    Ok((StatusCode::CREATED, Json(preference)))
}

pub async fn update_font_preference(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateFontPreferenceRequest>,
) -> Result<Json<FontPreference>, AppError> {
    let preference = state
        .store
        .update(&id, req.into_update()?)
        .await?
        .ok_or_else(preference_not_found)?;

    tracing::info!(preference_id = %preference.id, "Font preference updated");

    Ok(Json(preference))
}

pub async fn delete_font_preference(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete(&id).await? {
        return Err(preference_not_found());
    }

    tracing::info!(preference_id = %id, "Font preference deleted");

    Ok(StatusCode::NO_CONTENT)
}
