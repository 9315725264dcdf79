use anyhow::{Context, Result};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Desktop Chrome user agent sent when fetching audited pages.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const SERVICE_USER_AGENT: &str = concat!("seo-audit/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy)]
pub enum ClientType<'a> {
    /// API calls to PageSpeed, SERP and webhooks.
    Standard,
    /// Page fetches that should look like a regular browser visit.
    Browser,
    /// Browser-like fetches routed through a forward proxy.
    Proxied(&'a str),
}

/// Factory for creating an HTTP client with a bounded timeout.
pub fn create_client(client_type: ClientType<'_>, timeout: Duration) -> Result<Client> {
    let builder = Client::builder().timeout(timeout).connect_timeout(timeout);

    match client_type {
        ClientType::Standard => builder
            .user_agent(SERVICE_USER_AGENT)
            .build()
            .context("Failed to build standard HTTP client"),
        ClientType::Browser => builder
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .context("Failed to build browser HTTP client"),
        ClientType::Proxied(proxy_url) => {
            let proxy = Proxy::all(proxy_url)
                .with_context(|| format!("Invalid proxy URL: {proxy_url}"))?;
            builder
                .user_agent(BROWSER_USER_AGENT)
                .proxy(proxy)
                .build()
                .context("Failed to build proxied HTTP client")
        }
    }
}
