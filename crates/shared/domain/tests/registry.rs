use apphost_domain::constants::{APP_SETTINGS_FILE, environment_settings_file};
use apphost_domain::registry::ServiceKey;
use apphost_domain::settings::AppSettings;
use std::collections::HashSet;

trait Capability {}

#[test]
fn keys_compare_by_type() {
    assert_eq!(ServiceKey::of::<AppSettings>(), ServiceKey::of::<AppSettings>());
    assert_ne!(ServiceKey::of::<AppSettings>(), ServiceKey::of::<dyn Capability>());

    let keys: HashSet<_> =
        [ServiceKey::of::<AppSettings>(), ServiceKey::of::<AppSettings>()].into_iter().collect();
    assert_eq!(keys.len(), 1);
}

#[test]
fn keys_display_type_names() {
    let key = ServiceKey::of::<dyn Capability>();
    assert!(key.to_string().contains("Capability"));
    assert!(ServiceKey::of::<AppSettings>().name().ends_with("AppSettings"));
}

#[test]
fn settings_file_names() {
    assert_eq!(APP_SETTINGS_FILE, "appsettings.json");
    assert_eq!(environment_settings_file("Development"), "appsettings.Development.json");
}
