//! Repository implementations module.
//!
//! - `local`: In-memory implementation for unit testing and local development
//! - `rest`: Remote data store over its PostgREST HTTP API

#[cfg(feature = "local-repo")]
pub mod local;
#[cfg(feature = "rest-repo")]
pub mod rest;

#[cfg(feature = "local-repo")]
pub use local::{Collection, LocalRepository, LocalSeed};
#[cfg(feature = "rest-repo")]
pub use rest::{RequestStats, RestConfig, RestRepository};
