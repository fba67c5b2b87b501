use std::{collections::HashMap, fs, path::Path};

use shared::{protocol::propose_route, AbsentFieldPolicy};
use thiserror::Error;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "todo_ai.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid server url '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("server url '{0}' must use http or https")]
    UnsupportedScheme(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub absent_fields: AbsentFieldPolicy,
    pub log_filter: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            absent_fields: AbsentFieldPolicy::Clear,
            log_filter: "info".into(),
        }
    }
}

impl ClientSettings {
    /// Full url of the proposal endpoint under `server_url`.
    pub fn endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self.server_url.trim();
        let base = Url::parse(raw).map_err(|source| SettingsError::InvalidServerUrl {
            url: raw.to_string(),
            source,
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(raw.to_string()));
        }
        base.join(propose_route())
            .map_err(|source| SettingsError::InvalidServerUrl {
                url: raw.to_string(),
                source,
            })
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_with(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the optional settings file, then environment overrides.
pub fn load_settings_with(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, String>>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("server_url") {
                    settings.server_url = v.clone();
                }
                if let Some(v) = file_cfg.get("absent_fields") {
                    apply_absent_fields(&mut settings, v);
                }
                if let Some(v) = file_cfg.get("log_filter") {
                    settings.log_filter = v.clone();
                }
            }
            Err(err) => warn!("ignoring unreadable settings file '{}': {err}", file.display()),
        }
    }

    if let Some(v) = env("TODO_AI_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("APP__ABSENT_FIELDS") {
        apply_absent_fields(&mut settings, &v);
    }

    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    settings
}

fn apply_absent_fields(settings: &mut ClientSettings, raw: &str) {
    match AbsentFieldPolicy::parse(raw) {
        Some(policy) => settings.absent_fields = policy,
        None => warn!("unknown absent_fields value '{raw}'; keeping {:?}", settings.absent_fields),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
