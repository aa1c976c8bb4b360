use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{ExpEaseError, ExpEaseResult};
use crate::theme::ColorScheme;

pub const DEFAULT_API_BASE: &str = "https://exp-ease-backend.vercel.app/api/v1";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://img.freepik.com/free-vector/augmented-reality-urban-modeling-illustration_335657-372.jpg";

/// Environment variable that overrides `[api].base_url`.
pub const API_BASE_ENV: &str = "EXPEASE_API_BASE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base")]
    pub base_url: String,
    /// Request timeout. Left unset, the transport's own behaviour applies.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Thumbnail shown for records without an image.
    #[serde(default = "default_placeholder")]
    pub placeholder_image_url: String,
    #[serde(default)]
    pub color_scheme: ColorScheme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_image_url: default_placeholder(),
            color_scheme: ColorScheme::default(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Some(candidate);
            }
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        let candidate = cwd.join("config.toml");
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in working directory");
            return Some(candidate);
        }
    }

    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("expease").join("config.toml");
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in user config dir");
            return Some(candidate);
        }
    }

    None
}

/// Parse a config document and apply environment overrides.
pub fn parse_config(content: &str) -> ExpEaseResult<AppConfig> {
    let mut config: AppConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(base) = std::env::var(API_BASE_ENV) {
        if !base.trim().is_empty() {
            tracing::debug!(base = %base, "api base overridden from environment");
            config.api.base_url = base;
        }
    }
}

fn validate(config: &AppConfig) -> ExpEaseResult<()> {
    reqwest::Url::parse(&config.api.base_url).map_err(|e| {
        ExpEaseError::Config(format!("invalid api.base_url '{}': {e}", config.api.base_url))
    })?;
    Ok(())
}

/// Load `config.toml`, falling back to defaults when no file exists.
pub fn load_config() -> ExpEaseResult<AppConfig> {
    let Some(path) = resolve_config_path() else {
        tracing::info!("no config.toml found; using defaults");
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config);
        validate(&config)?;
        return Ok(config);
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(path = %path.display(), base = %config.api.base_url, "config loaded");
    Ok(config)
}

pub fn save_config(config: &AppConfig) -> ExpEaseResult<()> {
    let path = match resolve_config_path() {
        Some(p) => p,
        None => std::env::current_dir()?.join("config.toml"),
    };
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_API_BASE);
        assert_eq!(cfg.api.timeout_secs, None);
        assert_eq!(cfg.ui.placeholder_image_url, DEFAULT_PLACEHOLDER_IMAGE);
        assert_eq!(cfg.ui.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn reads_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:4000/api/v1"
            timeout_secs = 15

            [ui]
            color_scheme = "dark"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://localhost:4000/api/v1");
        assert_eq!(cfg.api.timeout_secs, Some(15));
        assert_eq!(cfg.ui.color_scheme, ColorScheme::Dark);
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let mut cfg = AppConfig::default();
        cfg.api.base_url = "not a url".into();
        assert!(matches!(validate(&cfg), Err(ExpEaseError::Config(_))));
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = AppConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.api.base_url, cfg.api.base_url);
    }
}
