//! PageSpeed Insights client (mobile strategy).
//!
//! Only the load-time family of Lighthouse audits and the performance category
//! score are read. Anything that goes wrong yields `None` and the assembler
//! falls back to [`PageSpeedMetrics::fallback`].

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

use crate::config::PageSpeedConfig;
use crate::service::http::{create_client, ClientType};

const DEFAULT_LOAD_TIME: f64 = 2.5;
const DEFAULT_FCP: f64 = 1.8;
const DEFAULT_LCP: f64 = 3.2;
const DEFAULT_TTI: f64 = 4.0;
const DEFAULT_SCORE: u8 = 70;
/// Used when the service answers but omits the performance category.
const MISSING_PERFORMANCE_SCORE: f64 = 0.5;

/// Load-time metrics in seconds (one decimal) plus a 0-100 performance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpeedMetrics {
    pub load_time: f64,
    pub first_contentful_paint: f64,
    pub largest_contentful_paint: f64,
    pub time_to_interactive: f64,
    pub score: u8,
}

impl PageSpeedMetrics {
    /// Values reported when the service could not be reached. Not a measurement.
    pub fn fallback() -> Self {
        Self {
            load_time: DEFAULT_LOAD_TIME,
            first_contentful_paint: DEFAULT_FCP,
            largest_contentful_paint: DEFAULT_LCP,
            time_to_interactive: DEFAULT_TTI,
            score: DEFAULT_SCORE,
        }
    }
}

/// Raw response from the PageSpeed API (only the parts we read)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageSpeedResponse {
    #[serde(default)]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize, Default)]
struct LighthouseResult {
    #[serde(default)]
    audits: HashMap<String, LighthouseAudit>,
    #[serde(default)]
    categories: LighthouseCategories,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LighthouseAudit {
    #[serde(default)]
    numeric_value: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct LighthouseCategories {
    #[serde(default)]
    performance: Option<LighthouseCategory>,
}

#[derive(Debug, Deserialize, Default)]
struct LighthouseCategory {
    #[serde(default)]
    score: Option<f64>,
}

impl LighthouseResult {
    /// Audit value converted from milliseconds to seconds, one decimal.
    fn seconds(&self, audit: &str, default: f64) -> f64 {
        self.audits
            .get(audit)
            .and_then(|a| a.numeric_value)
            .filter(|ms| *ms > 0.0)
            .map(|ms| (ms / 100.0).round() / 10.0)
            .unwrap_or(default)
    }

    fn performance_score(&self) -> u8 {
        let raw = self
            .categories
            .performance
            .as_ref()
            .and_then(|c| c.score)
            .filter(|s| *s > 0.0)
            .unwrap_or(MISSING_PERFORMANCE_SCORE);
        (raw.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    fn into_metrics(self) -> PageSpeedMetrics {
        PageSpeedMetrics {
            load_time: self.seconds("speed-index", DEFAULT_LOAD_TIME),
            first_contentful_paint: self.seconds("first-contentful-paint", DEFAULT_FCP),
            largest_contentful_paint: self.seconds("largest-contentful-paint", DEFAULT_LCP),
            time_to_interactive: self.seconds("interactive", DEFAULT_TTI),
            score: self.performance_score(),
        }
    }
}

/// Service for running mobile PageSpeed audits
pub struct PageSpeedService {
    client: Client,
    config: PageSpeedConfig,
}

impl PageSpeedService {
    pub fn new(config: PageSpeedConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(ClientType::Standard, config.timeout())?,
            config,
        })
    }

    /// Run a mobile audit. Failures are logged and reported as `None`.
    pub async fn analyze(&self, url: &Url) -> Option<PageSpeedMetrics> {
        tracing::info!("[PAGESPEED] Fetching data for: {}", url);
        match self.request(url).await {
            Ok(metrics) => {
                tracing::info!("[PAGESPEED] Success, score: {}", metrics.score);
                Some(metrics)
            }
            Err(e) => {
                tracing::warn!("[PAGESPEED] Unavailable: {:#}", e);
                None
            }
        }
    }

    async fn request(&self, url: &Url) -> Result<PageSpeedMetrics> {
        let mut query = vec![("url", url.as_str()), ("strategy", "mobile")];
        if !self.config.api_key.is_empty() {
            query.push(("key", self.config.api_key.as_str()));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to PageSpeed API")?;

        if !response.status().is_success() {
            anyhow::bail!("PageSpeed API error {}", response.status());
        }

        let body: PageSpeedResponse = response
            .json()
            .await
            .context("Failed to parse PageSpeed API response")?;

        Ok(body.lighthouse_result.unwrap_or_default().into_metrics())
    }
}
