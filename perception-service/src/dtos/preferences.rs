use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::font_size::FontSizeAction;

#[derive(Debug, Deserialize, Validate)]
pub struct FontSizeRequest {
    pub action: FontSizeAction,

    #[validate(range(min = 50, max = 300, message = "Font size must be between 50 and 300"))]
    pub value: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSizeResponse {
    pub font_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<FontSizeAction>,
    pub percentage: String,
}
