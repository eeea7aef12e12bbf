use apphost_domain::settings::{AppSettings, LoggingSettings};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn document_keys_are_pascal_case() {
    let raw = json!({ "ApiUrl": "https://example.com", "Timeout": 30 });

    let settings: AppSettings = serde_json::from_value(raw).expect("settings deserialize");
    assert_eq!(settings.api_url, "https://example.com");
    assert_eq!(settings.timeout, 30);
    assert_eq!(settings.timeout(), Duration::from_secs(30));
    assert_eq!(settings.logging, LoggingSettings::default());
    assert!(settings.extra.is_empty());
}

#[test]
fn unknown_sections_are_preserved() {
    let raw = json!({
        "ApiUrl": "https://example.com",
        "Timeout": 5,
        "FeatureFlags": { "Beta": true },
        "Retries": 3
    });

    let settings: AppSettings = serde_json::from_value(raw).expect("settings deserialize");
    assert_eq!(settings.get("FeatureFlags"), Some(json!({ "Beta": true })));
    assert_eq!(settings.get("Retries"), Some(json!(3)));
    assert_eq!(settings.get("ApiUrl"), Some(json!("https://example.com")));
    assert_eq!(settings.get("Timeout"), Some(json!(5)));
    assert_eq!(settings.get("Missing"), None);
}

#[test]
fn missing_required_field_is_an_error() {
    let raw = json!({ "ApiUrl": "https://example.com" });
    assert!(serde_json::from_value::<AppSettings>(raw).is_err());
}

#[test]
fn wrong_field_type_is_an_error() {
    let raw = json!({ "ApiUrl": "https://example.com", "Timeout": "thirty" });
    assert!(serde_json::from_value::<AppSettings>(raw).is_err());
}

#[test]
fn logging_section_fills_missing_keys_with_defaults() {
    let raw = json!({
        "ApiUrl": "https://example.com",
        "Timeout": 30,
        "Logging": { "Level": "Debug", "Directory": "logs" }
    });

    let settings: AppSettings = serde_json::from_value(raw).expect("settings deserialize");
    assert_eq!(settings.logging.level, "Debug");
    assert!(settings.logging.console);
    assert!(!settings.logging.json);
    assert_eq!(settings.logging.directory, Some(PathBuf::from("logs")));
    assert_eq!(settings.get("Logging").and_then(|v| v.get("Level").cloned()), Some(json!("Debug")));
}
