use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_SESSION_FILE: &str = "data/session.json";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend REST API location and transport limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Where the client-side session (token + role) is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { session_file: default_session_file() }
    }
}

/// Timings of the interactive helpers.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_notification_ttl_ms")]
    pub notification_ttl_ms: u64,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            notification_ttl_ms: default_notification_ttl_ms(),
            transition_ms: default_transition_ms(),
        }
    }
}

fn default_base_url() -> String { DEFAULT_API_BASE_URL.to_string() }
fn default_connect_timeout() -> u64 { 5 }
fn default_request_timeout() -> u64 { 30 }
fn default_session_file() -> String { DEFAULT_SESSION_FILE.to_string() }
fn default_debounce_ms() -> u64 { 500 }
fn default_notification_ttl_ms() -> u64 { 3000 }
fn default_transition_ms() -> u64 { 300 }

/// `CONFIG_PATH` or `config.toml`; see [`load_or_default`].
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_or_default(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)
        .map_err(|e| anyhow!("invalid config file {path}: {e}"))?;
    Ok(cfg)
}

/// Like [`load_from_file`], but a file that does not exist yields the defaults.
/// Unreadable or malformed files are still errors.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match load_from_file(path) {
        Ok(cfg) => Ok(cfg),
        Err(e) => match e.downcast_ref::<std::io::Error>() {
            Some(io) if io.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
            _ => Err(e),
        },
    }
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file falls back to defaults.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_with(|key| std::env::var(key).ok())
    }

    /// Same as [`normalize_and_validate`](Self::normalize_and_validate) with an
    /// explicit variable lookup instead of the process environment.
    pub fn normalize_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 环境变量优先于 TOML
        if let Some(url) = lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(path) = lookup("SESSION_FILE").filter(|v| !v.trim().is_empty()) {
            self.storage.session_file = path;
        }
        self.api.normalize()?;
        self.storage.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

impl ApiConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            self.base_url = default_base_url();
        } else {
            self.base_url = trimmed.to_string();
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("api.base_url must start with http:// or https://"));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(anyhow!("api timeouts must be positive seconds"));
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl StorageConfig {
    fn validate(&self) -> Result<()> {
        if self.session_file.trim().is_empty() {
            return Err(anyhow!("storage.session_file is empty"));
        }
        Ok(())
    }
}

impl UiConfig {
    fn validate(&self) -> Result<()> {
        if self.debounce_ms == 0 {
            return Err(anyhow!("ui.debounce_ms must be >= 1"));
        }
        if self.notification_ttl_ms == 0 {
            return Err(anyhow!("ui.notification_ttl_ms must be >= 1"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}
