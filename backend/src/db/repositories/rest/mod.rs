//! Remote data store repository over a PostgREST-compatible HTTP API.
//!
//! Every table is exposed at `{base_url}/rest/v1/{table}`. Requests carry
//! the project key both as `apikey` and as a bearer token.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATA_STORE_URL` or `SUPABASE_URL`: Project base URL (required)
//! - `DATA_STORE_KEY` or `SUPABASE_ANON_KEY`: API key (required)
//! - `DATA_STORE_TIMEOUT_SECS`: Request timeout in seconds (default: 15)
//! - `DATA_STORE_MAX_RETRIES`: Retry attempts for transient failures (default: 0)
//! - `DATA_STORE_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 200)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_RANGE};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::{
    ActivityLogEntry, AssignmentEvents, FabricationRecord, Launch, LaunchNumber, OldestRecord,
    Unit,
};
use crate::db::repository::activity::ActivitySlice;
use crate::db::repository::{
    ActivityRepository, DeliveryRepository, ErrorContext, InventoryRepository, RepositoryError,
    RepositoryResult,
};

pub mod query;
pub mod rows;

use query::{parse_content_range, Order, TableQuery};
use rows::*;

/// Configuration for connecting to the remote data store.
#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    /// Project base URL, without the `/rest/v1` suffix
    pub base_url: String,
    /// Key sent as `apikey` and bearer token
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 15,
            max_retries: 0,
            retry_delay_ms: 200,
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

impl RestConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let base_url = std::env::var("DATA_STORE_URL")
            .or_else(|_| std::env::var("SUPABASE_URL"))
            .map_err(|_| "DATA_STORE_URL or SUPABASE_URL must be set".to_string())?;
        let api_key = std::env::var("DATA_STORE_KEY")
            .or_else(|_| std::env::var("SUPABASE_ANON_KEY"))
            .map_err(|_| "DATA_STORE_KEY or SUPABASE_ANON_KEY must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            base_url,
            api_key,
            timeout_secs: env_parse("DATA_STORE_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            max_retries: env_parse("DATA_STORE_MAX_RETRIES").unwrap_or(defaults.max_retries),
            retry_delay_ms: env_parse("DATA_STORE_RETRY_DELAY_MS")
                .unwrap_or(defaults.retry_delay_ms),
        })
    }

    /// Create a configuration with a base URL and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// URL of a table or view.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }
}

/// Request counters for monitoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStats {
    pub total_requests: u64,
    pub failed_requests: u64,
    pub retried_requests: u64,
}

/// Repository backed by the remote data store.
#[derive(Clone, Debug)]
pub struct RestRepository {
    client: reqwest::Client,
    config: RestConfig,
    total_requests: Arc<AtomicU64>,
    failed_requests: Arc<AtomicU64>,
    retried_requests: Arc<AtomicU64>,
}

/// Response body plus the row count when it was requested.
struct Fetched {
    body: String,
    total: Option<u64>,
}

impl RestRepository {
    /// Build the HTTP client.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConfigurationError)` if the URL or key is
    ///   missing or the client cannot be built
    pub fn new(config: RestConfig) -> RepositoryResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RepositoryError::configuration_with_context(
                "Data store URL is empty",
                ErrorContext::new("create_rest_repository"),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(RepositoryError::configuration_with_context(
                "Data store key is empty",
                ErrorContext::new("create_rest_repository"),
            ));
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&config.api_key).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Invalid data store key: {}", e),
                ErrorContext::new("create_rest_repository"),
            )
        })?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key)).map_err(|e| {
            RepositoryError::configuration_with_context(
                format!("Invalid data store key: {}", e),
                ErrorContext::new("create_rest_repository"),
            )
        })?;
        headers.insert("apikey", key);
        headers.insert(reqwest::header::AUTHORIZATION, bearer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                RepositoryError::configuration_with_context(
                    format!("Failed to build HTTP client: {}", e),
                    ErrorContext::new("create_rest_repository"),
                )
            })?;

        log::info!(
            "Remote data store at {} (timeout={}s, max_retries={})",
            config.base_url,
            config.timeout_secs,
            config.max_retries
        );

        Ok(Self {
            client,
            config,
            total_requests: Arc::new(AtomicU64::new(0)),
            failed_requests: Arc::new(AtomicU64::new(0)),
            retried_requests: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    pub fn get_request_stats(&self) -> RequestStats {
        RequestStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            retried_requests: self.retried_requests.load(Ordering::Relaxed),
        }
    }

    /// Run a read, retrying transient failures up to `max_retries` times
    /// with exponential backoff.
    async fn fetch(&self, query: &TableQuery, operation: &str) -> RepositoryResult<Fetched> {
        let url = self.config.table_url(query.table());
        let max_retries = self.config.max_retries;
        let mut retry_delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut last_error = None;

        for attempt in 0..=max_retries {
            if attempt > 0 {
                self.retried_requests.fetch_add(1, Ordering::Relaxed);
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            self.total_requests.fetch_add(1, Ordering::Relaxed);
            match self.send_once(&url, query).await {
                Ok(fetched) => return Ok(fetched),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    log::debug!(
                        "{} on {} failed (attempt {}), retrying: {}",
                        operation,
                        query.table(),
                        attempt + 1,
                        e
                    );
                    last_error = Some(e);
                }
                Err(e) => {
                    self.failed_requests.fetch_add(1, Ordering::Relaxed);
                    return Err(e.with_operation(operation));
                }
            }
        }

        self.failed_requests.fetch_add(1, Ordering::Relaxed);
        Err(last_error
            .unwrap_or_else(|| RepositoryError::internal("Max retries exceeded with no error captured"))
            .with_operation(operation))
    }

    async fn send_once(&self, url: &str, query: &TableQuery) -> RepositoryResult<Fetched> {
        let mut request = self.client.get(url).query(&query.params());
        if query.wants_count() {
            request = request.header("Prefer", "count=exact");
        }

        let response = request.send().await?;
        let status = response.status();
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range);
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, query.table(), &body));
        }
        if query.wants_count() && total.is_none() {
            return Err(RepositoryError::validation_with_context(
                "Missing or malformed Content-Range header",
                ErrorContext::default().with_entity(query.table()),
            ));
        }

        Ok(Fetched { body, total })
    }

    async fn fetch_rows<R, T>(&self, query: TableQuery, operation: &str) -> RepositoryResult<Vec<T>>
    where
        R: for<'de> Deserialize<'de>,
        T: TryFrom<R, Error = RepositoryError>,
    {
        let fetched = self.fetch(&query, operation).await?;
        decode_rows::<R, T>(&fetched.body).map_err(|e| e.with_operation(operation))
    }

    async fn count(&self, table: &'static str, column: &str, operation: &str) -> RepositoryResult<u64> {
        let query = TableQuery::new(table).select(column).limit(1).count_exact();
        let fetched = self.fetch(&query, operation).await?;
        Ok(fetched.total.unwrap_or(0))
    }
}

fn status_error(status: StatusCode, table: &str, body: &str) -> RepositoryError {
    let context = ErrorContext::default()
        .with_entity(table)
        .with_details(format!("status={} body={}", status.as_u16(), body.trim()));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RepositoryError::configuration_with_context("Data store rejected the API key", context)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => RepositoryError::TimeoutError {
            message: "Data store timed out".to_string(),
            context: context.retryable(),
        },
        s if s.is_server_error() => RepositoryError::connection_with_context(
            "Data store unavailable",
            context,
        ),
        _ => RepositoryError::query_with_context("Data store rejected the query", context),
    }
}

#[async_trait]
impl InventoryRepository for RestRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let query = TableQuery::new(LAUNCHES).select("numero_lancamento").limit(1);
        self.fetch(&query, "health_check").await.map(|_| true)
    }

    async fn list_launches(&self) -> RepositoryResult<Vec<Launch>> {
        let query = TableQuery::new(LAUNCHES)
            .select(LAUNCH_COLUMNS)
            .order("numero_lancamento", Order::Desc);
        self.fetch_rows::<LaunchRow, Launch>(query, "list_launches").await
    }

    async fn get_launch(&self, launch_number: LaunchNumber) -> RepositoryResult<Launch> {
        let query = TableQuery::new(LAUNCHES)
            .select(LAUNCH_COLUMNS)
            .eq("numero_lancamento", launch_number.value())
            .limit(1);
        self.fetch_rows::<LaunchRow, Launch>(query, "get_launch")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Launch {} not found", launch_number.value()),
                    ErrorContext::new("get_launch")
                        .with_entity("launch")
                        .with_entity_id(launch_number.value()),
                )
            })
    }

    async fn latest_launch(&self) -> RepositoryResult<Option<Launch>> {
        let query = TableQuery::new(LAUNCHES)
            .select(LAUNCH_COLUMNS)
            .order("numero_lancamento", Order::Desc)
            .limit(1);
        Ok(self
            .fetch_rows::<LaunchRow, Launch>(query, "latest_launch")
            .await?
            .into_iter()
            .next())
    }

    async fn count_launches(&self) -> RepositoryResult<u64> {
        self.count(LAUNCHES, "numero_lancamento", "count_launches").await
    }

    async fn count_units(&self) -> RepositoryResult<u64> {
        self.count(UNITS, "numero_serie_saass", "count_units").await
    }

    async fn list_fabrications(&self) -> RepositoryResult<Vec<FabricationRecord>> {
        let query = TableQuery::new(UNITS)
            .select("numero_serie_saass,data_fabricacao")
            .not_null("data_fabricacao")
            .order("data_fabricacao", Order::Desc);
        self.fetch_rows::<FabricationRow, FabricationRecord>(query, "list_fabrications")
            .await
    }

    async fn get_units(&self, serial_numbers: &[String]) -> RepositoryResult<Vec<Unit>> {
        if serial_numbers.is_empty() {
            return Ok(Vec::new());
        }
        let query = TableQuery::new(UNITS)
            .select(UNIT_COLUMNS)
            .any_of("numero_serie_saass", serial_numbers);
        self.fetch_rows::<UnitRow, Unit>(query, "get_units").await
    }
}

#[async_trait]
impl DeliveryRepository for RestRepository {
    async fn latest_delivery(&self) -> RepositoryResult<Option<DateTime<Utc>>> {
        let query = TableQuery::new(DELIVERIES)
            .select("data_hora_entrega")
            .not_null("data_hora_entrega")
            .order_nulls_last("data_hora_entrega", Order::Desc)
            .limit(1);
        let fetched = self.fetch(&query, "latest_delivery").await?;
        let rows: Vec<DeliveryTimeRow> = serde_json::from_str(&fetched.body)
            .map_err(|e| RepositoryError::from(e).with_operation("latest_delivery"))?;
        Ok(rows
            .first()
            .map(DeliveryTimeRow::delivered_at)
            .transpose()?
            .flatten())
    }

    async fn oldest_delivery(&self) -> RepositoryResult<Option<OldestRecord>> {
        let query = TableQuery::new(DELIVERIES)
            .select(OLDEST_DELIVERY_COLUMNS)
            .not_null("data_hora_entrega")
            .order_nulls_last("data_hora_entrega", Order::Asc)
            .limit(1);
        Ok(self
            .fetch_rows::<OldestDeliveryRow, OldestRecord>(query, "oldest_delivery")
            .await?
            .into_iter()
            .next())
    }

    async fn list_assignment_events(
        &self,
        launch_number: Option<LaunchNumber>,
    ) -> RepositoryResult<Vec<AssignmentEvents>> {
        let mut query = TableQuery::new(ASSIGNMENTS)
            .select(ASSIGNMENT_EVENT_COLUMNS)
            .order("id_lancamento_saass", Order::Asc);
        if let Some(number) = launch_number {
            query = query.eq("numero_lancamento", number.value());
        }
        self.fetch_rows::<AssignmentEventsRow, AssignmentEvents>(query, "list_assignment_events")
            .await
    }
}

#[async_trait]
impl ActivityRepository for RestRepository {
    async fn fetch_activity(&self, offset: u64, limit: u64) -> RepositoryResult<ActivitySlice> {
        let query = TableQuery::new(ACTIVITY_VIEW)
            .order("data_hora", Order::Desc)
            .offset(offset)
            .limit(limit)
            .count_exact();
        let fetched = self.fetch(&query, "fetch_activity").await?;
        let entries = decode_rows::<ActivityRow, ActivityLogEntry>(&fetched.body)
            .map_err(|e| e.with_operation("fetch_activity"))?;
        Ok(ActivitySlice {
            total: fetched.total.unwrap_or(entries.len() as u64),
            entries,
        })
    }
}
