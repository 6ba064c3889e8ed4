use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::adapters::{classify_send_error, listing_url_with_stay, search_url};
use crate::config::types::{BrowserConfig, MarketplaceConfig};
use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

/// Fingerprint overrides injected before any page script runs. Headless
/// browsers leak through `navigator.webdriver` and an empty plugin list;
/// the marketplace checks both.
const STEALTH_SCRIPT: &str = r#"
Object.defineProperty(navigator, 'webdriver', { get: () => false });
Object.defineProperty(navigator, 'plugins', { get: () => [1, 2, 3, 4, 5] });
Object.defineProperty(navigator, 'languages', { get: () => ['en-US', 'en', 'he'] });
"#;

/// Remote headless-browser collaborator: full page render behind a
/// residential proxy, with fingerprint overrides applied before
/// navigation. The most expensive strategy and the last resort.
pub struct BrowserAdapter {
    client: reqwest::Client,
    config: BrowserConfig,
    marketplace: MarketplaceConfig,
}

impl BrowserAdapter {
    pub fn new(client: reqwest::Client, config: BrowserConfig, marketplace: MarketplaceConfig) -> Self {
        Self {
            client,
            config,
            marketplace,
        }
    }

    fn target_url(&self, request: &AcquisitionRequest) -> Result<String> {
        let url = match &request.listing_url {
            Some(listing) => listing_url_with_stay(listing, request)?,
            None => search_url(&self.marketplace, request)?,
        };
        Ok(url.into())
    }

    fn navigation_payload(&self, target: &str) -> serde_json::Value {
        let mut payload = json!({
            "url": target,
            "gotoOptions": {
                "waitUntil": "networkidle2",
                "timeout": self.config.timeout_secs * 1000,
            },
            "waitForTimeout": self.config.wait_ms,
            "addScriptTag": [{ "content": STEALTH_SCRIPT }],
        });

        if let (Some(host), Some(port)) = (&self.config.proxy_host, &self.config.proxy_port) {
            payload["launch"] = json!({
                "args": [format!("--proxy-server={host}:{port}")],
            });
        }
        if let (Some(user), Some(pass)) =
            (&self.config.proxy_username, &self.config.proxy_password)
        {
            payload["authenticate"] = json!({ "username": user, "password": pass });
        }
        payload
    }
}

#[async_trait]
impl PriceSource for BrowserAdapter {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::Browser
    }

    fn is_configured(&self) -> bool {
        self.config.api_token.is_some()
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        let token = self.config.api_token.as_deref().unwrap_or_default();
        let target = self.target_url(request)?;
        let url = format!("{}/content", self.config.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[("token", token)])
            .json(&self.navigation_payload(&target))
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "browser render returned page");
        Ok(vec![RawContent::markup(StrategyKind::Browser, body)])
    }
}
