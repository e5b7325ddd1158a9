use std::{collections::HashMap, fs, path::Path};

use tracing::warn;

use crate::navigation::PageLocation;

pub const SETTINGS_FILE: &str = "heroes.toml";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PAGE_LOCATION: &str = "heroes://roster/?order=asc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub page_location: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            page_location: DEFAULT_PAGE_LOCATION.into(),
        }
    }
}

impl Settings {
    /// Parses the configured location, falling back to the default one when it is
    /// not a usable URL.
    pub fn location(&self) -> PageLocation {
        PageLocation::parse(&self.page_location).unwrap_or_else(|err| {
            warn!(location = %self.page_location, "ignoring invalid page location: {err}");
            PageLocation::default()
        })
    }

    pub fn apply_file(&mut self, path: &Path) {
        let Ok(raw) = fs::read_to_string(path) else {
            return;
        };
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("api_base_url") {
                    self.api_base_url = normalize_base_url(v);
                }
                if let Some(v) = file_cfg.get("page_location") {
                    self.page_location = v.clone();
                }
            }
            Err(err) => warn!(path = %path.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    pub fn apply_env(&mut self) {
        if let Ok(v) = std::env::var("HEROES_API_BASE_URL") {
            self.api_base_url = normalize_base_url(&v);
        }
        if let Ok(v) = std::env::var("APP__API_BASE_URL") {
            self.api_base_url = normalize_base_url(&v);
        }
        if let Ok(v) = std::env::var("APP__PAGE_LOCATION") {
            self.page_location = v;
        }
    }
}

/// Defaults, then `heroes.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    settings.apply_file(Path::new(SETTINGS_FILE));
    settings.apply_env();
    settings
}

pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_BASE_URL.to_string();
    }
    trimmed.to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
