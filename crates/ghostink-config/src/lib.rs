//! GhostInk settings
//!
//! Read-only settings collaborator for the suggestion core: debounce
//! delay, wait-for-pause behavior, display mode and the master switch.
//! Any absent field substitutes its documented default.

pub mod error;
pub mod manager;
pub mod types;

pub use error::SettingsError;
pub use manager::SettingsManager;
pub use types::Settings;
