use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::SerpConfig;
use crate::service::http::{create_client, ClientType};

const MAX_ORGANIC_RESULTS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    /// 1-based rank on the results page.
    pub position: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerpData {
    pub organic_results: Vec<OrganicResult>,
}

impl SerpData {
    /// Rank of the first organic result linking to `domain`.
    pub fn position_of(&self, domain: &str) -> Option<u32> {
        self.organic_results
            .iter()
            .find(|r| r.link.contains(domain))
            .map(|r| r.position)
    }
}

#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic: Vec<RawOrganic>,
}

#[derive(Debug, Deserialize)]
struct RawOrganic {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
}

impl From<SerpResponse> for SerpData {
    fn from(response: SerpResponse) -> Self {
        let organic_results = response
            .organic
            .into_iter()
            .take(MAX_ORGANIC_RESULTS)
            .enumerate()
            .map(|(idx, r)| OrganicResult {
                title: r.title,
                link: r.link,
                position: idx as u32 + 1,
            })
            .collect();

        Self { organic_results }
    }
}

/// Search-results API client used to look up real keyword positions.
pub struct SerpService {
    client: Client,
    config: SerpConfig,
}

impl SerpService {
    pub fn new(config: SerpConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard, config.timeout())?,
            config,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Organic results for `query`, or `None` when unconfigured or failing.
    pub async fn search(&self, query: &str) -> Option<SerpData> {
        if !self.is_configured() {
            tracing::debug!("[SERP] API key not configured");
            return None;
        }

        match self.request(query).await {
            Ok(data) => {
                tracing::info!(
                    "[SERP] '{}' returned {} organic results",
                    query,
                    data.organic_results.len()
                );
                Some(data)
            }
            Err(e) => {
                tracing::warn!("[SERP] Lookup for '{}' failed: {:#}", query, e);
                None
            }
        }
    }

    /// Position of `domain` for `keyword`. `None` if not ranked or unavailable.
    pub async fn find_ranking(&self, keyword: &str, domain: &str) -> Option<u32> {
        self.search(keyword).await?.position_of(domain)
    }

    async fn request(&self, query: &str) -> Result<SerpData> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "query": query,
                "search_engine": "google",
                "country": "us",
                "language": "en",
            }))
            .send()
            .await
            .context("Failed to send request to SERP API")?;

        if !response.status().is_success() {
            anyhow::bail!("SERP API error {}", response.status());
        }

        let body: SerpResponse = response
            .json()
            .await
            .context("Failed to parse SERP API response")?;
        Ok(body.into())
    }
}
