//! Shell configuration
//!
//! Layers, lowest precedence first: `<config dir>/storefront/config.toml`,
//! a `.env` file, then `STOREFRONT_*` environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

pub const ENV_SUPABASE_URL: &str = "STOREFRONT_SUPABASE_URL";
pub const ENV_ANON_KEY: &str = "STOREFRONT_SUPABASE_ANON_KEY";
pub const ENV_PERSIST_SESSION: &str = "STOREFRONT_PERSIST_SESSION";
pub const ENV_LOG: &str = "STOREFRONT_LOG";

/// Values as written in `config.toml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    supabase_url: Option<String>,
    anon_key: Option<String>,
    persist_session: Option<bool>,
    auto_refresh_token: Option<bool>,
    session_file: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Application configuration wrapper.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
    source: Option<PathBuf>,
}

impl Config {
    /// Load `.env`, then read the default config file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("[CONFIG] loaded {}", path.display());
        }
        Self::from_sources(default_config_path().as_deref())
    }

    /// Read `file` (when it exists) and overlay the environment
    pub fn from_sources(file: Option<&Path>) -> Result<Self, ConfigError> {
        let (values, source) = match file {
            Some(path) if path.exists() => (read_file(path)?, Some(path.to_path_buf())),
            _ => (FileConfig::default(), None),
        };

        let mut builder = AppConfig::builder();
        builder = apply_file(builder, values);
        builder = apply_env(builder)?;

        let app = builder.build()?;
        if let Some(ref path) = source {
            tracing::info!("[CONFIG] using {}", path.display());
        }
        Ok(Self { app, source })
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self {
            app: builder.build()?,
            source: None,
        })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Config file the values came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn supabase_url(&self) -> &str {
        &self.app.supabase_url
    }

    pub fn log_filter(&self) -> &str {
        &self.app.log_filter
    }

    /// Where the session is persisted; `None` when persistence is off
    pub fn session_file(&self) -> Option<PathBuf> {
        if !self.app.persist_session {
            return None;
        }
        self.app.session_file.clone().or_else(|| {
            dirs::data_dir().map(|dir| {
                dir.join("storefront")
                    .join(format!("{}.json", self.app.storage_key()))
            })
        })
    }
}

/// `<config dir>/storefront/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storefront").join("config.toml"))
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let file_error = |message: String| ConfigError::File {
        path: path.to_path_buf(),
        message,
    };
    let text = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    toml::from_str(&text).map_err(|e| file_error(e.to_string()))
}

fn apply_file(mut builder: AppConfigBuilder, values: FileConfig) -> AppConfigBuilder {
    if let Some(url) = values.supabase_url {
        builder = builder.supabase_url(url);
    }
    if let Some(key) = values.anon_key {
        builder = builder.anon_key(key);
    }
    if let Some(persist) = values.persist_session {
        builder = builder.persist_session(persist);
    }
    if let Some(refresh) = values.auto_refresh_token {
        builder = builder.auto_refresh_token(refresh);
    }
    if let Some(path) = values.session_file {
        builder = builder.session_file(path);
    }
    if let Some(filter) = values.log_filter {
        builder = builder.log_filter(filter);
    }
    builder
}

fn apply_env(mut builder: AppConfigBuilder) -> Result<AppConfigBuilder, ConfigError> {
    if let Ok(url) = std::env::var(ENV_SUPABASE_URL) {
        builder = builder.supabase_url(url);
    }
    if let Ok(key) = std::env::var(ENV_ANON_KEY) {
        builder = builder.anon_key(key);
    }
    if let Ok(value) = std::env::var(ENV_PERSIST_SESSION) {
        builder = builder.persist_session(parse_flag(ENV_PERSIST_SESSION, &value)?);
    }
    if let Ok(filter) = std::env::var(ENV_LOG) {
        builder = builder.log_filter(filter);
    }
    Ok(builder)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
