pub mod font_preferences;
pub mod health;

pub use font_preferences::{
    create_font_preference, delete_font_preference, get_current_font_preference,
    get_font_preference, update_font_preference,
};
pub use health::{health_check, metrics_endpoint};
