//! Upstream watchit directory.
//!
//! Events are owned by an external service. Every request checks the watchit
//! identifier against it before touching the database.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;
use watchit_common::{AppError, AppResult, config::WatchitConfig};

/// Lookup of externally owned watchits.
#[async_trait]
pub trait WatchitDirectory: Send + Sync {
    /// Whether the upstream system knows `watchit_uuid`.
    async fn exists(&self, watchit_uuid: &str) -> AppResult<bool>;
}

/// Shared handle to a watchit directory.
pub type WatchitDirectoryService = Arc<dyn WatchitDirectory>;

/// Build the directory selected by configuration.
///
/// A configured `base_url` wins; otherwise only `known_ids` are accepted.
pub fn directory_from_config(config: &WatchitConfig) -> AppResult<WatchitDirectoryService> {
    match &config.base_url {
        Some(base_url) => Ok(Arc::new(HttpWatchitDirectory::new(
            base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )?)),
        None => Ok(Arc::new(StaticWatchitDirectory::new(
            config.known_ids.iter().cloned(),
        ))),
    }
}

/// Directory backed by the upstream watchit HTTP API.
///
/// Issues `GET {base_url}/watchits/{watchit_uuid}`: 2xx means known, 404 means
/// unknown, anything else is an upstream failure.
#[derive(Clone)]
pub struct HttpWatchitDirectory {
    base_url: Url,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpWatchitDirectory {
    /// Create a new HTTP directory client.
    pub fn new(base_url: Url, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("watchit-polls/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            api_key,
            http_client,
        })
    }

    fn lookup_url(&self, watchit_uuid: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                AppError::Config(format!("Watchit base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push("watchits")
            .push(watchit_uuid);
        Ok(url)
    }
}

#[async_trait]
impl WatchitDirectory for HttpWatchitDirectory {
    async fn exists(&self, watchit_uuid: &str) -> AppResult<bool> {
        if watchit_uuid.is_empty() {
            return Ok(false);
        }

        let url = self.lookup_url(watchit_uuid)?;
        let mut request = self.http_client.get(url);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Watchit lookup failed: {e}")))?;

        let status = response.status();
        debug!(watchit_uuid, status = status.as_u16(), "Watchit lookup");

        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(AppError::ExternalService(format!(
                "Watchit lookup returned {status}"
            )))
        }
    }
}

/// Directory over a fixed set of identifiers.
#[derive(Debug, Clone, Default)]
pub struct StaticWatchitDirectory {
    known: HashSet<String>,
}

impl StaticWatchitDirectory {
    /// Create a directory that knows exactly `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl WatchitDirectory for StaticWatchitDirectory {
    async fn exists(&self, watchit_uuid: &str) -> AppResult<bool> {
        Ok(!watchit_uuid.is_empty() && self.known.contains(watchit_uuid))
    }
}
