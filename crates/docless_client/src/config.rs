//! Client configuration: the immutable `DoclessConfig` handed to the client,
//! and the optional YAML file at `~/.docless/config.yaml` it can be built from.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Production chat API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://doclessai.vercel.app/api/v1";

/// Default request timeout (30 s).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "DOCLESS_CONFIG";

/// Settings for one [`crate::DoclessClient`]. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoclessConfig {
    app_key: String,
    base_url: String,
    timeout: Duration,
}

impl DoclessConfig {
    /// Config for `app_key` with the default endpoint and timeout.
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_key: app_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL. A trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !trimmed.is_empty() {
            self.base_url = trimmed.to_string();
        }
        self
    }

    /// Override the request timeout. Zero keeps the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn app_key(&self) -> &str {
        &self.app_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Fails with [`ConfigError::MissingAppKey`] when the key is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app_key.trim().is_empty() {
            return Err(ConfigError::MissingAppKey);
        }
        Ok(())
    }
}

/// On-disk config file schema.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ConfigFile {
    /// Build a validated [`DoclessConfig`], applying defaults for unset fields.
    pub fn into_config(self) -> Result<DoclessConfig, ConfigError> {
        let app_key = self.app_key.ok_or(ConfigError::MissingAppKey)?;
        let mut config = DoclessConfig::new(app_key);
        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config.validate()?;
        Ok(config)
    }
}

/// Returns the default config file path: `~/.docless/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".docless").join("config.yaml"))
}

/// Resolve the config path from an explicit override, `DOCLESS_CONFIG`, or the default.
pub fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = override_path {
        return Some(p.to_path_buf());
    }
    if let Some(val) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(val));
    }
    default_config_path()
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load a config file from YAML.
pub fn load(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

/// Load the config file at the resolved path. A path given explicitly (or via
/// `DOCLESS_CONFIG`) must exist; a missing default file yields an empty config.
pub fn load_resolved(override_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let explicit = override_path.is_some() || std::env::var_os(CONFIG_ENV_VAR).is_some();
    let Some(path) = resolve_config_path(override_path) else {
        return Ok(ConfigFile::default());
    };
    if !explicit && !path.exists() {
        return Ok(ConfigFile::default());
    }
    load(&path)
}

/// Save a config file as YAML. Creates the parent directory if missing.
pub fn save(path: &Path, file: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(file)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Config load/save/validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing app key")]
    MissingAppKey,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}
