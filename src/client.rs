//! REST client for the exhibitor order service.
//!
//! [`OrderSource`] is the seam the directory and sync engine depend on;
//! [`ExhibitorApi`] implements it over HTTP with `reqwest`. Every call
//! returns a plain [`Result`]; deciding what to do on failure (fallback
//! data, an absent health badge) is left to the caller.

use std::future::Future;
use std::time::Duration;

use reqwest::Url;
use tracing::{debug, info};

use crate::Result;
use crate::config::ApiConfig;
use crate::models::{Exhibitor, OrdersResponse, SystemStatus};

/// Query parameter asking the service to bypass its own cache.
const FORCE_REFRESH_PARAM: &str = "force_refresh";

/// Read-only access to exhibitors and their orders.
pub trait OrderSource: Send + Sync {
    /// Fetches the exhibitor directory.
    fn exhibitors(&self, force_refresh: bool) -> impl Future<Output = Result<Vec<Exhibitor>>> + Send;

    /// Fetches the orders of one exhibitor, addressed by name.
    fn orders(
        &self,
        exhibitor: &str,
        force_refresh: bool,
    ) -> impl Future<Output = Result<OrdersResponse>> + Send;

    /// Probes the service health endpoint.
    fn system_status(&self) -> impl Future<Output = Result<SystemStatus>> + Send;
}

/// HTTP implementation of [`OrderSource`].
#[derive(Debug, Clone)]
pub struct ExhibitorApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ExhibitorApi {
    /// Builds a client rooted at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`](crate::TrackerError::Config) if the
    /// base URL cannot carry path segments, or
    /// [`TrackerError::Http`](crate::TrackerError::Http) if the HTTP client
    /// cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.request_timeout)
    }

    /// Builds a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// See [`ExhibitorApi::new`].
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            crate::TrackerError::Config(format!("invalid API base URL {base_url:?}: {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(crate::TrackerError::Config(format!(
                "API base URL {base_url} cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Returns the URL for `segments` under the base, each segment
    /// percent-encoded, with the cache-bypass flag when requested.
    pub fn endpoint(&self, segments: &[&str], force_refresh: bool) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if force_refresh {
            url.query_pairs_mut().append_pair(FORCE_REFRESH_PARAM, "true");
        }
        url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl OrderSource for ExhibitorApi {
    async fn exhibitors(&self, force_refresh: bool) -> Result<Vec<Exhibitor>> {
        let url = self.endpoint(&["exhibitors"], force_refresh);
        let exhibitors: Vec<Exhibitor> = self.get_json(url).await?;
        info!(count = exhibitors.len(), force_refresh, "Fetched exhibitor directory");
        Ok(exhibitors)
    }

    async fn orders(&self, exhibitor: &str, force_refresh: bool) -> Result<OrdersResponse> {
        let url = self.endpoint(&["orders", "exhibitor", exhibitor], force_refresh);
        let response: OrdersResponse = self.get_json(url).await?;
        info!(
            exhibitor,
            count = response.orders.as_ref().map_or(0, Vec::len),
            force_refresh,
            "Fetched orders"
        );
        Ok(response)
    }

    async fn system_status(&self) -> Result<SystemStatus> {
        let url = self.endpoint(&["abacus-status"], false);
        let detail: serde_json::Value = self.get_json(url).await?;
        Ok(SystemStatus::online(detail))
    }
}
