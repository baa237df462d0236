//! Configuration management for the todo client.
//!
//! Loads configuration from ${TODO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides the remote base URL.
pub const BASE_URL_ENV: &str = "TODO_BASE_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and data directories.
    //!
    //! TODO_HOME resolution order:
    //! 1. TODO_HOME environment variable (if set)
    //! 2. ~/.config/todo (default)

    use std::path::PathBuf;

    /// Returns the todo home directory.
    pub fn todo_home() -> PathBuf {
        if let Ok(home) = std::env::var("TODO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".todo"),
            |h| h.join(".config").join("todo"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        todo_home().join("config.toml")
    }

    /// Returns the directory holding the local key-value store.
    pub fn store_dir() -> PathBuf {
        todo_home().join("store")
    }

    /// Returns the directory for rolling log files.
    pub fn logs_dir() -> PathBuf {
        todo_home().join("logs")
    }
}

/// Remote backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the todo service.
    pub base_url: String,
    /// Header used to scope requests to the signed-in user.
    pub user_header: String,
    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub const DEFAULT_BASE_URL: &str = "https://todo-backend-test.azurewebsites.net/";
    const DEFAULT_USER_HEADER: &str = "X-User";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Returns the request timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            user_header: Self::DEFAULT_USER_HEADER.to_string(),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Sign-in / sign-up screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of a status message, in milliseconds.
    pub message_timeout_ms: u64,
    /// Lifetime of the "Account created" message, in milliseconds.
    pub signup_message_timeout_ms: u64,
    /// Delay between a successful sign-up and the session start.
    pub signup_login_delay_ms: u64,
    pub min_username_len: usize,
    pub min_password_len: usize,
}

impl AuthConfig {
    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }

    pub fn signup_message_timeout(&self) -> Duration {
        Duration::from_millis(self.signup_message_timeout_ms)
    }

    pub fn signup_login_delay(&self) -> Duration {
        Duration::from_millis(self.signup_login_delay_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            message_timeout_ms: 1800,
            signup_message_timeout_ms: 1200,
            signup_login_delay_ms: 600,
            min_username_len: 3,
            min_password_len: 4,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive (e.g. "info", "todo_tui=debug").
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub auth: AuthConfig,
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Resolves the remote base URL.
    ///
    /// Resolution order:
    /// 1. `TODO_BASE_URL` env var (if set and non-empty)
    /// 2. `cli_override` (if Some and non-empty)
    /// 3. `remote.base_url` from config
    ///
    /// The returned URL always ends with `/` so item ids join as path segments.
    ///
    /// # Errors
    /// Returns an error if the selected value is not a valid absolute URL.
    pub fn remote_base_url(&self, cli_override: Option<&str>) -> Result<Url> {
        let env_value = std::env::var(BASE_URL_ENV).ok();
        resolve_base_url(env_value.as_deref(), cli_override, &self.remote.base_url)
    }
}

fn resolve_base_url(
    env_value: Option<&str>,
    cli_override: Option<&str>,
    configured: &str,
) -> Result<Url> {
    let raw = [env_value, cli_override]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(configured.trim());

    let mut url = Url::parse(raw).with_context(|| format!("Invalid remote base URL: {raw}"))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Remote base URL cannot carry paths: {raw}");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
