//! Per-user accessibility preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::services::font_size::{MAX_FONT_SIZE_PERCENT, MIN_FONT_SIZE_PERCENT};

/// Font size assigned to new records and restored by `reset`.
pub const DEFAULT_FONT_SIZE_PERCENT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastLevel {
    #[default]
    Normal,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub id: String,
    pub user_id: String,
    pub focus_mode: bool,
    pub motion_blocker: bool,
    pub contrast_level: ContrastLevel,
    pub larger_click_targets: bool,
    pub text_simplification: bool,
    pub read_aloud: bool,
    /// Integer percentage kept as a string on the wire.
    pub font_size: String,
    pub preferences: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// A record with every toggle off and the default font size.
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            focus_mode: false,
            motion_blocker: false,
            contrast_level: ContrastLevel::default(),
            larger_click_targets: false,
            text_simplification: false,
            read_aloud: false,
            font_size: DEFAULT_FONT_SIZE_PERCENT.to_string(),
            preferences: serde_json::Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields and bump `updated_at`.
    pub fn apply(&mut self, update: UserPreferencesUpdate) {
        let UserPreferencesUpdate {
            focus_mode,
            motion_blocker,
            contrast_level,
            larger_click_targets,
            text_simplification,
            read_aloud,
            font_size,
            preferences,
        } = update;

        if let Some(v) = focus_mode {
            self.focus_mode = v;
        }
        if let Some(v) = motion_blocker {
            self.motion_blocker = v;
        }
        if let Some(v) = contrast_level {
            self.contrast_level = v;
        }
        if let Some(v) = larger_click_targets {
            self.larger_click_targets = v;
        }
        if let Some(v) = text_simplification {
            self.text_simplification = v;
        }
        if let Some(v) = read_aloud {
            self.read_aloud = v;
        }
        if let Some(v) = font_size {
            self.font_size = match v.trim().parse::<u32>() {
                Ok(percent) => percent.to_string(),
                Err(_) => v,
            };
        }
        if let Some(v) = preferences {
            self.preferences = v;
        }
        self.updated_at = Utc::now();
    }

    /// Stored font size as a number; unparseable values read as the default.
    pub fn font_size_percent(&self) -> u32 {
        self.font_size
            .trim()
            .parse()
            .unwrap_or(DEFAULT_FONT_SIZE_PERCENT)
    }
}

/// Partial update of [`UserPreferences`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferencesUpdate {
    pub focus_mode: Option<bool>,
    pub motion_blocker: Option<bool>,
    pub contrast_level: Option<ContrastLevel>,
    pub larger_click_targets: Option<bool>,
    pub text_simplification: Option<bool>,
    pub read_aloud: Option<bool>,
    pub font_size: Option<String>,
    pub preferences: Option<serde_json::Map<String, serde_json::Value>>,
}

impl UserPreferencesUpdate {
    pub fn font_size(percent: u32) -> Self {
        Self {
            font_size: Some(percent.to_string()),
            ..Self::default()
        }
    }
}

impl Validate for UserPreferencesUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(size) = &self.font_size {
            let in_range = size
                .trim()
                .parse::<u32>()
                .map(|v| (MIN_FONT_SIZE_PERCENT..=MAX_FONT_SIZE_PERCENT).contains(&v))
                .unwrap_or(false);

            if !in_range {
                let mut error = ValidationError::new("range");
                error.message = Some(Cow::Owned(format!(
                    "Font size must be an integer percentage between {} and {}",
                    MIN_FONT_SIZE_PERCENT, MAX_FONT_SIZE_PERCENT
                )));
                errors.add("fontSize", error);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
