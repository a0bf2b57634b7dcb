//! Tests for db::factory - repository creation and configuration.

mod support;

use std::io::Write;
use std::str::FromStr;

use saass_dashboard::db::factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
use saass_dashboard::db::{InventoryRepository, RepositoryError};

#[test]
fn test_repository_type_from_str_rest_aliases() {
    for alias in ["rest", "REST", "remote", "supabase"] {
        assert_eq!(RepositoryType::from_str(alias).unwrap(), RepositoryType::Rest);
    }
}

#[test]
fn test_repository_type_from_str_local_aliases() {
    for alias in ["local", "LOCAL", "memory"] {
        assert_eq!(RepositoryType::from_str(alias).unwrap(), RepositoryType::Local);
    }
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("postgres");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_clean_store_env(&[], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[test]
fn test_repository_type_from_env_with_store_url() {
    support::with_clean_store_env(&[("DATA_STORE_URL", Some("https://store.test"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Rest);
    });
    support::with_clean_store_env(&[("SUPABASE_URL", Some("https://store.test"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Rest);
    });
}

#[test]
fn test_repository_type_from_env_explicit_wins() {
    support::with_clean_store_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATA_STORE_URL", Some("https://store.test")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_from_env_unknown_falls_back_to_local() {
    support::with_clean_store_env(&[("REPOSITORY_TYPE", Some("mystery"))], || {
        assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
    });
}

#[tokio::test]
async fn test_factory_create_local() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None).unwrap();
    assert!(repo.health_check().await.unwrap());
    assert!(repo.list_launches().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_factory_create_local_from_seed() {
    let path = support::seed_path();
    let repo = RepositoryFactory::create_local(Some(path.as_path())).unwrap();
    assert_eq!(repo.count_launches().await.unwrap(), 3);
    assert_eq!(repo.count_units().await.unwrap(), 4);
}

#[test]
fn test_factory_create_rest_requires_config() {
    let result = RepositoryFactory::create(RepositoryType::Rest, None);
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));
}

#[test]
fn test_factory_from_env_rest_requires_key() {
    let result = support::with_clean_store_env(
        &[("DATA_STORE_URL", Some("https://store.test"))],
        RepositoryFactory::from_env,
    );
    match result {
        Err(RepositoryError::ConfigurationError { message, .. }) => {
            assert!(message.contains("DATA_STORE_KEY"));
        }
        Err(other) => panic!("expected configuration error, got {}", other),
        Ok(_) => panic!("expected configuration error"),
    }
}

#[test]
fn test_factory_from_env_rest() {
    let result = support::with_clean_store_env(
        &[
            ("DATA_STORE_URL", Some("https://store.test")),
            ("DATA_STORE_KEY", Some("anon-key")),
        ],
        RepositoryFactory::from_env,
    );
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_builder_from_env_loads_seed_file() {
    let path = support::seed_path();
    let path = path.to_string_lossy().to_string();
    let repo = support::with_clean_store_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("LOCAL_SEED_FILE", Some(path.as_str())),
        ],
        || RepositoryBuilder::new().from_env().unwrap().build(),
    )
    .unwrap();

    assert_eq!(repo.count_launches().await.unwrap(), 3);
}

#[tokio::test]
async fn test_factory_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[repository]\ntype = \"local\"\n\n[local]\nseed_file = \"{}\"",
        support::seed_path().display()
    )
    .unwrap();

    let repo = RepositoryFactory::from_config_file(file.path()).unwrap();
    let latest = repo.latest_launch().await.unwrap().unwrap();
    assert_eq!(latest.launch_number.value(), 3);
}

#[test]
fn test_factory_from_config_file_rest_without_url() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"rest\"").unwrap();

    let result = RepositoryFactory::from_config_file(file.path());
    assert!(matches!(result, Err(RepositoryError::ConfigurationError { .. })));
}

#[test]
fn test_factory_from_default_config_uses_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[repository]\ntype = \"memory\"").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let result = support::with_clean_store_env(
        &[("SAASS_CONFIG", Some(path.as_str()))],
        RepositoryFactory::from_default_config,
    );
    assert!(result.is_ok());
}
