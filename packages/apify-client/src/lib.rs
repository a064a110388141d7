//! Apify REST API client for the Facebook post search actor.
//!
//! A minimal client for the Apify platform API. Supports starting runs of
//! `powerai~facebook-post-search-scraper` and reading the run's dataset
//! items, plus the bounded poll loop that waits for items to appear.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{poll_dataset, ApifyClient, JobSubmitter, PollConfig, SearchRequest};
//!
//! let client = ApifyClient::new("your-api-token".into());
//! let handle = client.submit_search(&request).await?;
//! let items = poll_dataset(&client, &handle, &PollConfig::default()).await;
//! ```

pub mod error;
pub mod poller;
pub mod types;

pub use error::{ApifyError, Result};
pub use poller::{poll_dataset, DatasetSource, PollConfig, PollState};
pub use types::{Record, ResultSet, RunHandle, SearchRequest, DEFAULT_LOCATION_UID};

use async_trait::async_trait;
use types::SearchActorInput;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor ID for powerai/facebook-post-search-scraper.
const FACEBOOK_POST_SEARCH_ACTOR: &str = "powerai~facebook-post-search-scraper";

/// Submits a search to the scraping service, yielding a run handle.
#[async_trait]
pub trait JobSubmitter {
    async fn submit_search(&self, request: &SearchRequest) -> Result<RunHandle>;
}

pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, BASE_URL.to_string())
    }

    /// Point the client at a different API root. Test servers mostly.
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url,
        }
    }
}

#[async_trait]
impl JobSubmitter for ApifyClient {
    /// Start a search run. Returns immediately with the run handle; the run
    /// itself keeps executing on the Apify side.
    ///
    /// This actor's endpoints authenticate with a `token` query parameter,
    /// not an Authorization header.
    async fn submit_search(&self, request: &SearchRequest) -> Result<RunHandle> {
        let input = SearchActorInput::from(request);

        let url = format!(
            "{}/acts/{}/runs",
            self.base_url, FACEBOOK_POST_SEARCH_ACTOR
        );
        let resp = self
            .client
            .post(&url)
            .query(&[("token", &self.token)])
            .json(&input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: serde_json::Value = resp.json().await?;
        let run_id = body
            .pointer("/data/id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(ApifyError::MissingRunId)?;

        tracing::info!(run_id, query = %request.query, "Apify run started");
        Ok(RunHandle {
            run_id: run_id.to_string(),
        })
    }
}

#[async_trait]
impl DatasetSource for ApifyClient {
    /// Read the dataset items of a run. The array is empty while the run is
    /// still producing output.
    async fn fetch_items(&self, handle: &RunHandle) -> Result<ResultSet> {
        let url = format!(
            "{}/actor-runs/{}/dataset/items",
            self.base_url, handle.run_id
        );
        let resp = self
            .client
            .get(&url)
            .query(&[("token", &self.token)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApifyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let items: ResultSet = resp.json().await?;
        Ok(items)
    }
}
