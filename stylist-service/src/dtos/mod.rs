use serde::Deserialize;
use service_core::error::AppError;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{FontFamily, FontPreferenceUpdate, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX};

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

fn validate_font_family(family: &str) -> Result<(), ValidationError> {
    family.parse::<FontFamily>().map(|_| ()).map_err(|_| {
        let names: Vec<&str> = FontFamily::ALL.iter().map(|f| f.as_str()).collect();
        validation_error(
            "font_family",
            format!("Font family must be one of: {}", names.join(", ")),
        )
    })
}

fn validate_font_size(size: u32) -> Result<(), ValidationError> {
    if size < MIN_FONT_SIZE_PX {
        return Err(validation_error(
            "font_size",
            format!("Font size must be at least {}px", MIN_FONT_SIZE_PX),
        ));
    }
    if size > MAX_FONT_SIZE_PX {
        return Err(validation_error(
            "font_size",
            format!("Font size must be at most {}px", MAX_FONT_SIZE_PX),
        ));
    }
    Ok(())
}

fn parse_family(family: &str) -> Result<FontFamily, AppError> {
    family.parse().map_err(AppError::bad_request)
}

fn collect(font_family: Option<&str>, font_size: Option<u32>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Some(Err(e)) = font_family.map(validate_font_family) {
        errors.add("fontFamily", e);
    }
    if let Some(Err(e)) = font_size.map(validate_font_size) {
        errors.add("fontSize", e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFontPreferenceRequest {
    pub font_family: String,
    pub font_size: u32,
}

impl Validate for CreateFontPreferenceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect(Some(self.font_family.as_str()), Some(self.font_size))
    }
}

impl CreateFontPreferenceRequest {
    pub fn font_family(&self) -> Result<FontFamily, AppError> {
        parse_family(&self.font_family)
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFontPreferenceRequest {
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
}

impl Validate for UpdateFontPreferenceRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        collect(self.font_family.as_deref(), self.font_size)
    }
}

impl UpdateFontPreferenceRequest {
    pub fn into_update(self) -> Result<FontPreferenceUpdate, AppError> {
        Ok(FontPreferenceUpdate {
            font_family: self.font_family.as_deref().map(parse_family).transpose()?,
            font_size: self.font_size,
        })
    }
}
