use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::adapters::{classify_send_error, listing_url_with_stay, search_url};
use crate::config::types::{MarketplaceConfig, UnblockerConfig};
use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

/// Proxy-unblocker collaborator: hands the target URL to a scraping proxy
/// that rotates residential IPs and optionally renders JavaScript, then
/// returns the final markup. Slower and metered, so it sits behind the
/// cheaper strategies in the waterfall.
pub struct UnblockerAdapter {
    client: reqwest::Client,
    config: UnblockerConfig,
    marketplace: MarketplaceConfig,
}

impl UnblockerAdapter {
    pub fn new(client: reqwest::Client, config: UnblockerConfig, marketplace: MarketplaceConfig) -> Self {
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
}

#[async_trait]
impl PriceSource for UnblockerAdapter {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::Unblocker
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let target = self.target_url(request)?;

        let response = self
            .client
            .get(&self.config.base_url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[
                ("api_key", api_key),
                ("url", target.as_str()),
                ("render", if self.config.render { "true" } else { "false" }),
                ("country_code", self.config.country_code.as_str()),
            ])
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "unblocker returned page");
        Ok(vec![RawContent::markup(StrategyKind::Unblocker, body)])
    }
}
