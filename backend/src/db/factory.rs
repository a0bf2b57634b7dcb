//! Repository factory for dependency injection.
//!
//! Creates and configures repository instances from runtime configuration
//! (environment variables or `repository.toml`).

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
use super::repositories::LocalRepository;
#[cfg(feature = "rest-repo")]
use super::repositories::RestRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::RestConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Remote data store over HTTP
    Rest,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string.
    ///
    /// # Arguments
    /// * `s` - String representation ("rest", "supabase", "local", "memory")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" | "remote" | "supabase" => Ok(Self::Rest),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, defaults to Rest if a data store
    /// URL is present, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to local repository", e);
                Self::Local
            });
        }

        if std::env::var("DATA_STORE_URL").is_ok() || std::env::var("SUPABASE_URL").is_ok() {
            Self::Rest
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```no_run
/// use saass_dashboard::db::{RepositoryFactory, RepositoryType};
///
/// let local = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
/// let from_env = RepositoryFactory::from_env().unwrap();
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `rest_config` - Remote store configuration (required for Rest)
    pub fn create(
        repo_type: RepositoryType,
        rest_config: Option<&RestConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Rest => {
                #[cfg(feature = "rest-repo")]
                {
                    let config = rest_config.ok_or_else(|| {
                        RepositoryError::configuration("Remote repository requires RestConfig")
                    })?;
                    let rest = Self::create_rest(config)?;
                    Ok(rest as Arc<dyn FullRepository>)
                }
                #[cfg(not(feature = "rest-repo"))]
                {
                    let _ = rest_config;
                    Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ))
                }
            }
            RepositoryType::Local => Self::create_local(None),
        }
    }

    /// Create a remote store repository.
    #[cfg(feature = "rest-repo")]
    pub fn create_rest(config: &RestConfig) -> RepositoryResult<Arc<RestRepository>> {
        Ok(Arc::new(RestRepository::new(config.clone())?))
    }

    /// Create an in-memory local repository, optionally seeded from a JSON file.
    #[cfg(feature = "local-repo")]
    pub fn create_local(seed_file: Option<&Path>) -> RepositoryResult<Arc<dyn FullRepository>> {
        match seed_file {
            Some(path) => Ok(Arc::new(LocalRepository::from_seed_file(path)?)),
            None => Ok(Arc::new(LocalRepository::new())),
        }
    }

    #[cfg(not(feature = "local-repo"))]
    pub fn create_local(seed_file: Option<&Path>) -> RepositoryResult<Arc<dyn FullRepository>> {
        let _ = seed_file;
        Err(RepositoryError::configuration(
            "Local repository feature not enabled",
        ))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` to pick the backend; the remote store reads its
    /// settings through [`RestConfig::from_env`] and the local store an
    /// optional `LOCAL_SEED_FILE`.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().from_env()?.build()
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        RepositoryBuilder::new().with_config(config)?.build()
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use saass_dashboard::db::{RepositoryBuilder, RepositoryType};
///
/// let repo = RepositoryBuilder::new()
///     .repository_type(RepositoryType::Local)
///     .seed_file("seed.json")
///     .build()
///     .unwrap();
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    rest_config: Option<RestConfig>,
    seed_file: Option<PathBuf>,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::from_env(),
            rest_config: None,
            seed_file: None,
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the remote store configuration.
    pub fn rest_config(mut self, config: RestConfig) -> Self {
        self.rest_config = Some(config);
        self
    }

    /// Seed the local store from a JSON fixture.
    pub fn seed_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_file = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, RepositoryError> {
        self.repo_type = RepositoryType::from_env();

        match self.repo_type {
            RepositoryType::Rest => {
                #[cfg(feature = "rest-repo")]
                {
                    let config = RestConfig::from_env().map_err(RepositoryError::configuration)?;
                    self.rest_config = Some(config);
                }
                #[cfg(not(feature = "rest-repo"))]
                {
                    return Err(RepositoryError::configuration(
                        "Remote repository feature not enabled",
                    ));
                }
            }
            RepositoryType::Local => {
                if let Ok(path) = std::env::var("LOCAL_SEED_FILE") {
                    self.seed_file = Some(PathBuf::from(path));
                }
            }
        }

        Ok(self)
    }

    /// Load configuration from a TOML file.
    pub fn from_config_file<P: AsRef<Path>>(self, config_path: P) -> Result<Self, RepositoryError> {
        let repo_config = RepositoryConfig::from_file(config_path)?;
        self.with_config(&repo_config)
    }

    /// Apply an already parsed configuration.
    pub fn with_config(mut self, repo_config: &RepositoryConfig) -> Result<Self, RepositoryError> {
        self.repo_type = repo_config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match self.repo_type {
            RepositoryType::Rest => {
                let config = repo_config.to_rest_config()?.ok_or_else(|| {
                    RepositoryError::configuration(
                        "Remote repository requires a [rest] section",
                    )
                })?;
                self.rest_config = Some(config);
            }
            RepositoryType::Local => {
                self.seed_file = repo_config.local.seed_file.clone();
            }
        }

        Ok(self)
    }

    /// Build the repository instance.
    pub fn build(self) -> RepositoryResult<Arc<dyn FullRepository>> {
        match self.repo_type {
            RepositoryType::Local => RepositoryFactory::create_local(self.seed_file.as_deref()),
            RepositoryType::Rest => {
                RepositoryFactory::create(self.repo_type, self.rest_config.as_ref())
            }
        }
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "local-repo")]
    use crate::db::repository::InventoryRepository;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("rest").unwrap(),
            RepositoryType::Rest
        );
        assert_eq!(
            RepositoryType::from_str(" Supabase ").unwrap(),
            RepositoryType::Rest
        );
        assert!(RepositoryType::from_str("invalid").is_err());
    }

    #[cfg(feature = "local-repo")]
    #[tokio::test]
    async fn test_create_local_repository() {
        let repo = RepositoryFactory::create_local(None).unwrap();
        assert!(repo.health_check().await.unwrap());
    }

    #[cfg(feature = "local-repo")]
    #[tokio::test]
    async fn test_builder_local_repository() {
        let repo = RepositoryBuilder::new()
            .repository_type(RepositoryType::Local)
            .build()
            .unwrap();

        assert!(repo.health_check().await.unwrap());
    }

    #[test]
    fn test_rest_without_config_is_configuration_error() {
        let result = RepositoryFactory::create(RepositoryType::Rest, None);
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }

    #[cfg(feature = "local-repo")]
    #[test]
    fn test_missing_seed_file_is_configuration_error() {
        let result = RepositoryFactory::create_local(Some(Path::new("/nonexistent/seed.json")));
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
