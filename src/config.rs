//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\lyrics-finder\config.toml
//! - macOS: ~/Library/Application Support/lyrics-finder/config.toml
//! - Linux: ~/.config/lyrics-finder/config.toml
//!
//! Every section is optional; missing keys take their defaults. Provider
//! credentials can also be supplied through the environment (see the CLI).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::lyrics::{FailurePolicy, SolveLimits, Source};
use crate::lyrics::{genius, lrclib, lyrics_ovh, musixmatch};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shared HTTP client settings
    pub http: HttpConfig,

    /// Search fan-out settings
    pub search: SearchConfig,

    /// Per-provider endpoints and credentials
    pub providers: ProvidersConfig,

    /// Proof-of-work bounds for publishing
    pub publish: PublishConfig,
}

/// HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("lyrics-finder/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Providers to query. Merge order is fixed by source regardless.
    pub providers: Vec<Source>,

    /// Per-provider timeout in seconds
    pub timeout_secs: u64,

    /// "skip" or "fail_fast"
    pub failure_policy: FailurePolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            providers: Source::ALL.to_vec(),
            timeout_secs: 10,
            failure_policy: FailurePolicy::Skip,
        }
    }
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_enabled(&self, source: Source) -> bool {
        self.providers.contains(&source)
    }
}

/// Provider endpoints and credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub lrclib: LrclibConfig,
    pub musixmatch: MusixmatchConfig,
    pub genius: GeniusConfig,
    pub lyrics_ovh: LyricsOvhConfig,
}

/// LRCLIB settings (no credentials needed)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LrclibConfig {
    pub base_url: String,
}

impl Default for LrclibConfig {
    fn default() -> Self {
        Self {
            base_url: lrclib::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Musixmatch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusixmatchConfig {
    pub base_url: String,

    /// API key (or MUSIXMATCH_API_KEY)
    pub api_key: Option<String>,
}

impl Default for MusixmatchConfig {
    fn default() -> Self {
        Self {
            base_url: musixmatch::DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Genius settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeniusConfig {
    pub base_url: String,

    /// Client access token (or GENIUS_ACCESS_TOKEN)
    pub access_token: Option<String>,
}

impl Default for GeniusConfig {
    fn default() -> Self {
        Self {
            base_url: genius::DEFAULT_BASE_URL.to_string(),
            access_token: None,
        }
    }
}

/// Title/artist lyrics lookup service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsOvhConfig {
    pub base_url: String,
}

impl Default for LyricsOvhConfig {
    fn default() -> Self {
        Self {
            base_url: lyrics_ovh::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Proof-of-work bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Give up after this many nonces (unset = no cap)
    pub max_iterations: Option<u64>,

    /// Give up after this many seconds (unset = no limit)
    pub timeout_secs: Option<u64>,

    /// Spread the search over all cores
    pub parallel: bool,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            timeout_secs: Some(600),
            parallel: true,
        }
    }
}

impl PublishConfig {
    pub fn solve_limits(&self) -> SolveLimits {
        SolveLimits {
            max_iterations: self.max_iterations,
            timeout: self.timeout_secs.map(Duration::from_secs),
            parallel: self.parallel,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyrics-finder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, falling back to defaults
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
