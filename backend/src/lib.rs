//! # SAASS Dashboard Backend
//!
//! Read-side backend for the SAASS equipment inventory dashboard.
//!
//! This crate reads launches, units, delivery and return events and the
//! activity log from a remote tabular data store and derives the datasets
//! the dashboard shows: headline statistics, a twelve-month delivery
//! forecast, launch tables and a paginated activity feed.
//!
//! ## Features
//!
//! - **Statistics**: current launch, days since last delivery and fabrication, unit counts
//! - **Forecast**: deliveries projected every 60 days from the last one
//! - **Launches**: per-launch unit counts, lifecycle status of each assignment
//! - **Activity**: newest-first log with relative timestamps
//! - **Time Handling**: ceiling day arithmetic on UTC instants, fixed-offset display
//! - **HTTP API**: read-only JSON endpoints for the dashboard client
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`db`]: Repository pattern, remote and in-memory stores, read orchestration
//! - [`models`]: Inventory entities and date helpers
//! - [`services`]: Pure computations over fetched data
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`routes`]: Route paths and response types per screen

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod models;

pub mod routes;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
