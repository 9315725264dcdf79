//! Raw HTML retrieval for audited pages.
//!
//! Tries, in order: the configured forward proxy, the unlocker request API and a
//! plain GET with browser headers. A page that cannot be fetched is `None`, not
//! an error; the audit carries on with empty signals.

use anyhow::Result;
use reqwest::{header, Client};
use serde_json::json;
use url::Url;

use crate::config::FetcherConfig;
use crate::service::http::{create_client, ClientType};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

pub struct PageFetcher {
    config: FetcherConfig,
    direct: Client,
    proxied: Option<Client>,
    api: Client,
}

impl PageFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let timeout = config.timeout();
        let proxied = if config.has_proxy() {
            Some(create_client(ClientType::Proxied(&config.proxy_url), timeout)?)
        } else {
            None
        };

        Ok(Self {
            direct: create_client(ClientType::Browser, timeout)?,
            api: create_client(ClientType::Standard, timeout)?,
            proxied,
            config,
        })
    }

    pub async fn fetch(&self, url: &Url) -> Option<String> {
        if let Some(client) = &self.proxied {
            tracing::debug!("[FETCH] Trying proxy for {}", url);
            match Self::get_html(client, url).await {
                Ok(html) => {
                    tracing::info!("[FETCH] Proxy success, {} bytes", html.len());
                    return Some(html);
                }
                Err(e) => tracing::warn!("[FETCH] Proxy fetch failed: {}", e),
            }
        }

        if self.config.has_unlocker_api() {
            tracing::debug!("[FETCH] Trying unlocker API for {}", url);
            match self.fetch_via_unlocker(url).await {
                Ok(html) => {
                    tracing::info!("[FETCH] Unlocker API success, {} bytes", html.len());
                    return Some(html);
                }
                Err(e) => tracing::warn!("[FETCH] Unlocker API failed: {}", e),
            }
        }

        tracing::debug!("[FETCH] Direct fetch for {}", url);
        match Self::get_html(&self.direct, url).await {
            Ok(html) => {
                tracing::info!("[FETCH] Direct fetch success, {} bytes", html.len());
                Some(html)
            }
            Err(e) => {
                tracing::warn!("[FETCH] Direct fetch failed for {}: {}", url, e);
                None
            }
        }
    }

    async fn get_html(client: &Client, url: &Url) -> Result<String> {
        let response = client
            .get(url.as_str())
            .header(header::ACCEPT, ACCEPT_HTML)
            .header(header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("status {}", status);
        }
        Ok(response.text().await?)
    }

    async fn fetch_via_unlocker(&self, url: &Url) -> Result<String> {
        let response = self
            .api
            .post(&self.config.unlocker_endpoint)
            .bearer_auth(&self.config.unlocker_api_key)
            .json(&json!({
                "zone": self.config.unlocker_zone,
                "url": url.as_str(),
                "format": "raw",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("status {}", status);
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn page_url(server: &mockito::ServerGuard, path: &str) -> Url {
        Url::parse(&server.url()).unwrap().join(path).unwrap()
    }

    #[tokio::test]
    async fn test_direct_fetch_returns_html() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_header("user-agent", Matcher::Regex("Chrome".into()))
            .with_status(200)
            .with_body("<html><title>Hello</title></html>")
            .create_async()
            .await;

        let fetcher = PageFetcher::new(FetcherConfig::default()).unwrap();
        let html = fetcher.fetch(&page_url(&server, "/")).await;
        assert_eq!(html.as_deref(), Some("<html><title>Hello</title></html>"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_none() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/blocked")
            .with_status(403)
            .with_body("denied")
            .create_async()
            .await;

        let fetcher = PageFetcher::new(FetcherConfig::default()).unwrap();
        assert!(fetcher.fetch(&page_url(&server, "/blocked")).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_none() {
        let fetcher = PageFetcher::new(FetcherConfig {
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        assert!(fetcher.fetch(&url).await.is_none());
    }

    #[tokio::test]
    async fn test_unlocker_api_used_when_configured() {
        let mut server = mockito::Server::new_async().await;
        let api = server
            .mock("POST", "/request")
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "zone": "web_unlocker",
                "format": "raw",
            })))
            .with_status(200)
            .with_body("<html>unlocked</html>")
            .create_async()
            .await;

        let config = FetcherConfig {
            unlocker_api_key: "secret".into(),
            unlocker_customer_id: "c_123".into(),
            unlocker_endpoint: format!("{}/request", server.url()),
            ..Default::default()
        };
        let fetcher = PageFetcher::new(config).unwrap();
        let html = fetcher.fetch(&page_url(&server, "/target")).await;

        assert_eq!(html.as_deref(), Some("<html>unlocked</html>"));
        api.assert_async().await;
    }

    #[tokio::test]
    async fn test_falls_back_to_direct_when_upstreams_fail() {
        let mut server = mockito::Server::new_async().await;
        let _api = server
            .mock("POST", "/request")
            .with_status(502)
            .create_async()
            .await;
        let direct = server
            .mock("GET", "/target")
            .with_status(200)
            .with_body("<html>direct</html>")
            .create_async()
            .await;

        let config = FetcherConfig {
            proxy_url: "http://127.0.0.1:1".into(),
            unlocker_api_key: "secret".into(),
            unlocker_customer_id: "c_123".into(),
            unlocker_endpoint: format!("{}/request", server.url()),
            timeout_secs: 2,
            ..Default::default()
        };
        let fetcher = PageFetcher::new(config).unwrap();
        let html = fetcher.fetch(&page_url(&server, "/target")).await;

        assert_eq!(html.as_deref(), Some("<html>direct</html>"));
        direct.assert_async().await;
    }
}
