//! Runtime configuration, loaded from TOML with built-in defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and deserialize a TOML file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Bot handle shown in the help text.
    #[serde(default = "default_bot_username")]
    pub bot_username: String,
    /// Locale used when a request carries none.
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Media table (sticker ids).
    pub media: Option<PathBuf>,
    /// Directory of `<locale>.toml` catalogs.
    pub locales_dir: Option<PathBuf>,
    /// JSON file of per-user statistics.
    pub stats_file: Option<PathBuf>,
    #[serde(default = "default_stats_timeout_ms")]
    pub stats_timeout_ms: u64,
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_news_url")]
    pub news_url: String,
}

fn default_bot_username() -> String {
    "unobot".into()
}

fn default_locale() -> String {
    "en".into()
}

fn default_stats_timeout_ms() -> u64 {
    500
}

fn default_source_url() -> String {
    "https://github.com/jh0ker/mau_mau_bot".into()
}

fn default_news_url() -> String {
    "https://telegram.me/unobotupdates".into()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bot_username: default_bot_username(),
            default_locale: default_locale(),
            media: None,
            locales_dir: None,
            stats_file: None,
            stats_timeout_ms: default_stats_timeout_ms(),
            source_url: default_source_url(),
            news_url: default_news_url(),
        }
    }
}

impl EngineConfig {
    pub fn stats_timeout(&self) -> Duration {
        Duration::from_millis(self.stats_timeout_ms)
    }

    /// Resolve relative paths against the directory of the config file.
    fn rebase(mut self, base: &Path) -> Self {
        let join = |p: Option<PathBuf>| p.map(|p| if p.is_relative() { base.join(p) } else { p });
        self.media = join(self.media);
        self.locales_dir = join(self.locales_dir);
        self.stats_file = join(self.stats_file);
        self
    }
}

/// Load the config from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = read_toml(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.rebase(base))
}

/// Try well-known paths, returning the defaults if none is found.
pub fn load_default_config() -> EngineConfig {
    let candidates = [
        "uno_menu.toml",
        "../uno_menu.toml",
        "/etc/uno-menu/uno_menu.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_config(p) {
                Ok(config) => {
                    tracing::info!(path = %p.display(), "loaded engine config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load engine config");
                }
            }
        }
    }
    tracing::info!("no uno_menu.toml found, using built-in defaults");
    EngineConfig::default()
}
