use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_FONT_SIZE_PX: u32 = 12;
pub const MAX_FONT_SIZE_PX: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    Arial,
    Verdana,
    Georgia,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    Courier,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Arial,
        FontFamily::Verdana,
        FontFamily::Georgia,
        FontFamily::TimesNewRoman,
        FontFamily::Courier,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::Verdana => "Verdana",
            FontFamily::Georgia => "Georgia",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Courier => "Courier",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| format!("Unknown font family: {}", s))
    }
}

/// A stored font family and pixel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontPreference {
    pub id: String,
    pub font_family: FontFamily,
    pub font_size: u32,
}

impl FontPreference {
    pub fn new(font_family: FontFamily, font_size: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            font_family,
            font_size,
        }
    }

    pub fn apply(&mut self, update: FontPreferenceUpdate) {
        if let Some(family) = update.font_family {
            self.font_family = family;
        }
        if let Some(size) = update.font_size {
            self.font_size = size;
        }
    }
}

/// Fields to change on an existing preference; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontPreferenceUpdate {
    pub font_family: Option<FontFamily>,
    pub font_size: Option<u32>,
}
