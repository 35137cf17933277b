pub mod store;

pub use store::{FontPreferenceStore, InMemoryFontPreferenceStore};
