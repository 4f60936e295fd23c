//! Application configuration module
//!
//! Provides the backend connection settings and a validating builder.

use std::path::PathBuf;

use thiserror::Error;

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "storefront=info";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the hosted project, e.g. `https://abc.supabase.co`
    pub supabase_url: String,
    /// Public anonymous API key
    pub anon_key: String,
    /// Persist the session across restarts
    pub persist_session: bool,
    /// Refresh an expiring access token on session retrieval
    pub auto_refresh_token: bool,
    /// Overrides the default session file location
    pub session_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supabase_url.trim().is_empty() {
            return Err(ConfigError::MissingValue("supabase_url"));
        }
        if !(self.supabase_url.starts_with("https://") || self.supabase_url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(self.supabase_url.clone()));
        }
        if self.anon_key.trim().is_empty() {
            return Err(ConfigError::MissingValue("anon_key"));
        }
        Ok(())
    }

    /// Project reference: the first host label of the project URL.
    ///
    /// `https://mrlvisvcqlytkssxblpr.supabase.co` yields `mrlvisvcqlytkssxblpr`.
    pub fn project_ref(&self) -> &str {
        let without_scheme = self
            .supabase_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.supabase_url);
        let host = without_scheme.split(['/', ':']).next().unwrap_or(without_scheme);
        host.split('.').next().unwrap_or(host)
    }

    /// Storage key the backend client persists the session under
    pub fn storage_key(&self) -> String {
        format!("sb-{}-auth-token", self.project_ref())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    supabase_url: Option<String>,
    anon_key: Option<String>,
    persist_session: Option<bool>,
    auto_refresh_token: Option<bool>,
    session_file: Option<PathBuf>,
    log_filter: Option<String>,
}

impl AppConfigBuilder {
    /// Set the project URL
    pub fn supabase_url(mut self, url: impl Into<String>) -> Self {
        self.supabase_url = Some(url.into());
        self
    }

    /// Set the anonymous API key
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    pub fn persist_session(mut self, persist: bool) -> Self {
        self.persist_session = Some(persist);
        self
    }

    pub fn auto_refresh_token(mut self, refresh: bool) -> Self {
        self.auto_refresh_token = Some(refresh);
        self
    }

    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let config = AppConfig {
            supabase_url: self
                .supabase_url
                .ok_or(ConfigError::MissingValue("supabase_url"))?
                .trim_end_matches('/')
                .to_string(),
            anon_key: self.anon_key.ok_or(ConfigError::MissingValue("anon_key"))?,
            persist_session: self.persist_session.unwrap_or(true),
            auto_refresh_token: self.auto_refresh_token.unwrap_or(true),
            session_file: self.session_file,
            log_filter: self
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {message}")]
    File { path: PathBuf, message: String },
}
