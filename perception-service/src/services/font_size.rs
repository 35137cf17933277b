//! Font-size adjustment rules.

use serde::{Deserialize, Serialize};

use crate::models::DEFAULT_FONT_SIZE_PERCENT;

pub const MIN_FONT_SIZE_PERCENT: u32 = 50;
pub const MAX_FONT_SIZE_PERCENT: u32 = 300;
pub const FONT_SIZE_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeAction {
    Increase,
    Decrease,
    Set,
    Reset,
}

/// Compute the next font size. Results always stay within
/// [`MIN_FONT_SIZE_PERCENT`, `MAX_FONT_SIZE_PERCENT`].
///
/// `Set` without a value keeps the current size.
pub fn apply(current: u32, action: FontSizeAction, value: Option<u32>) -> u32 {
    let next = match action {
        FontSizeAction::Increase => current.saturating_add(FONT_SIZE_STEP),
        FontSizeAction::Decrease => current.saturating_sub(FONT_SIZE_STEP),
        FontSizeAction::Set => value.unwrap_or(current),
        FontSizeAction::Reset => DEFAULT_FONT_SIZE_PERCENT,
    };
    clamp(next)
}

pub fn clamp(size: u32) -> u32 {
    size.clamp(MIN_FONT_SIZE_PERCENT, MAX_FONT_SIZE_PERCENT)
}

pub fn percentage_label(size: u32) -> String {
    format!("{}%", size)
}
