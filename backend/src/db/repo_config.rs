//! Repository configuration file support.
//!
//! Reads `repository.toml`:
//!
//! ```toml
//! [repository]
//! type = "rest"
//!
//! [rest]
//! base_url = "https://project.supabase.co"
//! api_key = "..."
//!
//! [local]
//! seed_file = "seed.json"
//!
//! [display]
//! utc_offset_hours = -3
//! legacy_offset_shift = false
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{ErrorContext, RepositoryError};
use crate::db::RestConfig;
use crate::models::time::{DateFormatter, DEFAULT_UTC_OFFSET_HOURS};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SAASS_CONFIG";

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub rest: RestSettings,
    #[serde(default)]
    pub local: LocalSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Remote data store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestSettings {
    #[serde(default)]
    pub base_url: String,
    /// Left empty to take the key from `DATA_STORE_KEY`/`SUPABASE_ANON_KEY`.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RestSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// In-memory store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

/// Date display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub legacy_offset_shift: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            legacy_offset_shift: false,
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_retry_delay_ms() -> u64 {
    200
}

fn default_utc_offset_hours() -> i32 {
    DEFAULT_UTC_OFFSET_HOURS
}

impl DisplaySettings {
    /// Read `DISPLAY_UTC_OFFSET_HOURS` and `DISPLAY_LEGACY_OFFSET`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            utc_offset_hours: std::env::var("DISPLAY_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.utc_offset_hours),
            legacy_offset_shift: std::env::var("DISPLAY_LEGACY_OFFSET")
                .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.legacy_offset_shift),
        }
    }

    /// Formatter for these settings.
    pub fn formatter(&self) -> Result<DateFormatter, RepositoryError> {
        DateFormatter::new(self.utc_offset_hours, self.legacy_offset_shift).ok_or_else(|| {
            RepositoryError::configuration_with_context(
                format!("UTC offset out of range: {}", self.utc_offset_hours),
                ErrorContext::new("display_settings").with_details("expected -23..=23"),
            )
        })
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: RepositoryConfig = toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;

        log::debug!("Loaded repository config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load repository configuration from the default location.
    ///
    /// Uses the path in `SAASS_CONFIG` when set, otherwise searches for
    /// `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(explicit);
        }

        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("backend/repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// Formatter described by the `[display]` section.
    pub fn formatter(&self) -> Result<DateFormatter, RepositoryError> {
        self.display.formatter()
    }

    /// Convert to RestConfig if this is a remote store configuration.
    #[cfg(feature = "rest-repo")]
    pub fn to_rest_config(&self) -> Result<Option<RestConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Rest {
            return Ok(None);
        }

        if self.rest.base_url.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "Remote repository requires 'rest.base_url' setting",
            ));
        }

        let api_key = if self.rest.api_key.trim().is_empty() {
            std::env::var("DATA_STORE_KEY")
                .or_else(|_| std::env::var("SUPABASE_ANON_KEY"))
                .map_err(|_| {
                    RepositoryError::configuration(
                        "Remote repository requires 'rest.api_key' or DATA_STORE_KEY",
                    )
                })?
        } else {
            self.rest.api_key.clone()
        };

        Ok(Some(RestConfig {
            base_url: self.rest.base_url.clone(),
            api_key,
            timeout_secs: self.rest.timeout_secs,
            max_retries: self.rest.max_retries,
            retry_delay_ms: self.rest.retry_delay_ms,
        }))
    }

    /// Convert to RestConfig when the feature is disabled.
    #[cfg(not(feature = "rest-repo"))]
    pub fn to_rest_config(&self) -> Result<Option<RestConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type == RepositoryType::Rest {
            return Err(RepositoryError::configuration(
                "Remote repository feature not enabled",
            ));
        }

        Ok(None)
    }
}
