//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a TOML file, then environment variables,
//! then command-line arguments (highest priority). Anything left unset falls
//! back to compiled defaults.
//!
//! Missing config file: warning + defaults + startup. Malformed config file:
//! `Error::Config`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP port for satya-ck
pub const DEFAULT_PORT: u16 = 5780;

/// Firebase placeholder key that means "not configured"
pub const DEMO_API_KEY: &str = "demo-api-key";

/// Identity Toolkit REST endpoint
pub const DEFAULT_FIREBASE_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "satya.db";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Folder holding satya.db
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            bind: default_bind(),
            port: default_port(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Identity provider selection and settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Firebase Web API key; empty or "demo-api-key" selects the mock provider
    #[serde(default)]
    pub firebase_api_key: Option<String>,

    #[serde(default = "default_firebase_base_url")]
    pub firebase_base_url: String,

    /// Under mock auth, treat callers without a session as a synthetic user
    #[serde(default = "default_true")]
    pub mock_anonymous_fallback: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            firebase_api_key: None,
            firebase_base_url: default_firebase_base_url(),
            mock_anonymous_fallback: true,
        }
    }
}

impl AuthConfig {
    /// True when a usable Firebase API key is present
    pub fn firebase_configured(&self) -> bool {
        self.firebase_api_key
            .as_deref()
            .map(str::trim)
            .map(|key| !key.is_empty() && key != DEMO_API_KEY)
            .unwrap_or(false)
    }
}

/// Analysis flow settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Artificial delay before returning a verdict (the web UI used 2000)
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// File not found at this path; defaults used
    Missing(PathBuf),
    /// No platform config directory; defaults used
    NoConfigDir,
}

/// Outcome of [`TomlConfig::load_with_report`], logged by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: ConfigSource,
    /// Environment overrides that could not be applied
    pub ignored_env: Vec<String>,
}

impl LoadReport {
    pub fn log(&self) {
        match &self.source {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file not found at {}, using defaults",
                path.display()
            ),
            ConfigSource::NoConfigDir => {
                warn!("Could not determine config directory, using defaults")
            }
        }
        for message in &self.ignored_env {
            warn!("{}", message);
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_firebase_base_url() -> String {
    DEFAULT_FIREBASE_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load config, tolerating a missing file, and log how it was found
    ///
    /// `explicit` (from `--config`) wins over `SATYA_CONFIG`, which wins over
    /// the platform config directory.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (config, report) = Self::load_with_report(explicit)?;
        report.log();
        Ok(config)
    }

    /// Load config without logging
    ///
    /// For callers that install their log subscriber only after the config
    /// is known; they call [`LoadReport::log`] once logging is up.
    pub fn load_with_report(explicit: Option<&Path>) -> Result<(Self, LoadReport)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var("SATYA_CONFIG")
                .ok()
                .map(PathBuf::from)
                .or_else(default_config_path),
        };

        let (mut config, source) = match path {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                (config, ConfigSource::File(path))
            }
            Some(path) => (Self::default(), ConfigSource::Missing(path)),
            None => (Self::default(), ConfigSource::NoConfigDir),
        };

        let ignored_env = config.apply_env_overrides();
        Ok((config, LoadReport { source, ignored_env }))
    }

    /// Apply environment variable overrides
    ///
    /// `NEXT_PUBLIC_FIREBASE_API_KEY` is honoured for deployments that share
    /// an environment file with the web front-end; `SATYA_FIREBASE_API_KEY`
    /// takes precedence over it. Returns the overrides that were ignored.
    pub fn apply_env_overrides(&mut self) -> Vec<String> {
        let mut ignored = Vec::new();

        if let Ok(root) = std::env::var("SATYA_ROOT_FOLDER") {
            self.root_folder = Some(PathBuf::from(root));
        }

        if let Ok(port) = std::env::var("SATYA_CK_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => ignored.push(format!("Ignoring invalid SATYA_CK_PORT '{}'", port)),
            }
        }

        let api_key = std::env::var("SATYA_FIREBASE_API_KEY")
            .or_else(|_| std::env::var("NEXT_PUBLIC_FIREBASE_API_KEY"));
        if let Ok(key) = api_key {
            self.auth.firebase_api_key = Some(key);
        }

        ignored
    }

    /// Root folder, falling back to the OS default
    pub fn root_folder(&self) -> PathBuf {
        self.root_folder
            .clone()
            .unwrap_or_else(default_root_folder)
    }

    /// Path of satya.db inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder().join(DATABASE_FILE)
    }
}

/// `<config_dir>/satya/satya-ck.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("satya").join("satya-ck.toml"))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("satya"))
        .unwrap_or_else(|| PathBuf::from("./satya_data"))
}
