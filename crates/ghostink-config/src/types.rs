//! Core settings types

use serde::{Deserialize, Serialize};

/// Suggestion engine settings
///
/// Every field is optional in the serialized form; absent fields take the
/// documented defaults (300 ms / false / true / true).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Delay between the last qualifying edit and a completion request
    #[serde(default = "default_debounce_time_ms")]
    pub debounce_time_ms: u64,
    /// Only request once no typing occurred for the whole debounce window
    #[serde(default)]
    pub wait_for_pause: bool,
    /// Inline ghost text (true) or interactive tooltip (false)
    #[serde(default = "default_true")]
    pub use_ghost_text: bool,
    /// Master switch
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

fn default_debounce_time_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_time_ms: default_debounce_time_ms(),
            wait_for_pause: false,
            use_ghost_text: true,
            is_enabled: true,
        }
    }
}

impl Settings {
    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_time_ms)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        if self.debounce_time_ms == 0 {
            return Err(crate::error::SettingsError::Validation(
                "debounce_time_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
