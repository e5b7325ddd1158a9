use super::{normalize_base_url, Settings, DEFAULT_API_BASE_URL};

use std::{
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use shared::domain::SortOrder;

#[test]
fn normalizes_trailing_slashes_and_blank_urls() {
    assert_eq!(
        normalize_base_url(" http://localhost:5000/ "),
        "http://localhost:5000"
    );
    assert_eq!(normalize_base_url("   "), DEFAULT_API_BASE_URL);
}

#[test]
fn settings_file_overrides_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("heroes_settings_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("heroes.toml");
    fs::write(
        &path,
        "api_base_url = \"http://roster.internal:8080/\"\npage_location = \"?order=dsc\"\n",
    )
    .expect("write settings");

    let mut settings = Settings::default();
    settings.apply_file(&path);

    assert_eq!(settings.api_base_url, "http://roster.internal:8080");
    assert_eq!(settings.location().sort_order(), SortOrder::Dsc);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn missing_or_malformed_settings_file_keeps_defaults() {
    let mut settings = Settings::default();
    settings.apply_file(&env::temp_dir().join("heroes_settings_that_do_not_exist.toml"));
    assert_eq!(settings, Settings::default());

    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("heroes_settings_bad_{suffix}.toml"));
    fs::write(&path, "api_base_url = [1, 2").expect("write settings");
    settings.apply_file(&path);
    assert_eq!(settings, Settings::default());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn invalid_page_location_falls_back_to_default() {
    let settings = Settings {
        page_location: "definitely not a url".to_string(),
        ..Settings::default()
    };
    assert_eq!(settings.location().sort_order(), SortOrder::Asc);
}

#[test]
fn environment_overrides_api_base_url() {
    env::set_var("APP__API_BASE_URL", "http://from-env:9000/");
    let mut settings = Settings::default();
    settings.apply_env();
    env::remove_var("APP__API_BASE_URL");

    assert_eq!(settings.api_base_url, "http://from-env:9000");
}
