//! Settings collaborator contract
//!
//! The core must tolerate any field being absent and substitute the
//! documented defaults (300 ms, false, true, true).

use ghostink_config::Settings;

#[test]
fn test_empty_payload_yields_documented_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings.debounce_time_ms, 300);
    assert!(!settings.wait_for_pause);
    assert!(settings.use_ghost_text);
    assert!(settings.is_enabled);
}

#[test]
fn test_each_field_absent_individually() {
    let settings: Settings =
        serde_json::from_str(r#"{"wait_for_pause": true, "is_enabled": false}"#).unwrap();
    assert_eq!(settings.debounce_time_ms, 300);
    assert!(settings.wait_for_pause);
    assert!(settings.use_ghost_text);
    assert!(!settings.is_enabled);
}

#[test]
fn test_round_trip_preserves_values() {
    let settings = Settings {
        debounce_time_ms: 450,
        wait_for_pause: true,
        use_ghost_text: false,
        is_enabled: true,
    };
    let json = serde_json::to_string(&settings).unwrap();
    let back: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);
}
