//! Read-only Wikidata API client.
//!
//! Fetches entities by item id or by English Wikipedia title, and runs
//! full-text searches. Responses are wrapped in [`EntityView`], which exposes
//! the handful of field paths person resolution needs.
//!
//! # Example
//!
//! ```rust,ignore
//! use wikidata_client::{EntityLookup, WikidataClient};
//!
//! let client = WikidataClient::new().with_user_agent("my-tool/1.0 (ops@example.org)");
//!
//! let ada = client.get_by_site_title("Ada Lovelace").await?;
//! println!("{} born {:?}", ada.identifier(), ada.born_in());
//!
//! for title in client.search_titles("James Duffy").await? {
//!     println!("{title}");
//! }
//! ```

pub mod entity;
pub mod error;
pub mod lookup;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use entity::{year_of, EntityView, Lookup};
pub use error::{Result, WikidataError};
pub use lookup::{validate_query, EntityLookup};
pub use types::{EntitiesResponse, EntityId, SearchResponse, NOT_FOUND_SENTINEL};

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_API_ROOT: &str = "https://www.wikidata.org/w/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("people-searcher/", env!("CARGO_PKG_VERSION"));

/// Wikidata `api.php` client.
#[derive(Clone)]
pub struct WikidataClient {
    http_client: Client,
    api_root: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for WikidataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikidataClient {
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            api_root: DEFAULT_API_ROOT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point at a different `api.php` (mirror, test wiki).
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Per-request timeout. Expiry surfaces as [`WikidataError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wikimedia asks API clients for a descriptive, contactable user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `?action=wbgetentities&ids={id}&format=json`
    pub fn entity_by_id_url(&self, id: &EntityId) -> Result<Url> {
        self.api_url(&[("action", "wbgetentities"), ("ids", id.as_str())])
    }

    /// `?action=wbgetentities&sites=enwiki&titles={title}&format=json`
    pub fn entity_by_title_url(&self, title: &str) -> Result<Url> {
        let title = validate_query(title)?;
        self.api_url(&[
            ("action", "wbgetentities"),
            ("sites", "enwiki"),
            ("titles", title),
        ])
    }

    /// `?action=query&list=search&srsearch={query}&format=json`
    pub fn search_url(&self, query: &str) -> Result<Url> {
        let query = validate_query(query)?;
        self.api_url(&[("action", "query"), ("list", "search"), ("srsearch", query)])
    }

    fn api_url(&self, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.api_root).map_err(|e| {
            WikidataError::Config(format!("invalid API root {:?}: {}", self.api_root, e))
        })?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("format", "json");
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "Wikidata request");
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .get(url.clone())
            .header(header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Wikidata request failed");
                WikidataError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = %status, "Wikidata API error");
            return Err(WikidataError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(
            url = %url,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis(),
            "Wikidata response"
        );
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl EntityLookup for WikidataClient {
    async fn get_by_id(&self, id: &EntityId) -> Result<EntityView> {
        let url = self.entity_by_id_url(id)?;
        entity_view(self.get_json(url).await?)
    }

    async fn get_by_site_title(&self, title: &str) -> Result<EntityView> {
        let url = self.entity_by_title_url(title)?;
        entity_view(self.get_json(url).await?)
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>> {
        let url = self.search_url(query)?;
        let response: SearchResponse = self.get_json(url).await?;
        if let Some(error) = response.error {
            return Err(error.into());
        }
        Ok(response
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }
}

fn entity_view(mut response: EntitiesResponse) -> Result<EntityView> {
    if let Some(error) = response.error.take() {
        return Err(error.into());
    }
    Ok(EntityView::from_response(response))
}
