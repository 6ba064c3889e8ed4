use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::{classify_send_error, listing_url_with_stay, search_url};
use crate::config::types::{DirectConfig, MarketplaceConfig};
use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

/// Which part of the direct-fetch family this instance covers.
///
/// The fast path only fires when the request already carries a listing URL
/// and never searches; the fallback resolves the hotel through the
/// marketplace's autocomplete endpoint first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectMode {
    ListingOnly,
    SearchFallback,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    results: Vec<AutocompleteHit>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteHit {
    #[serde(default)]
    dest_type: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    b_hotel_url: Option<String>,
}

impl AutocompleteHit {
    fn is_hotel(&self) -> bool {
        self.dest_type.as_deref() == Some("hotel") || self.kind.as_deref() == Some("ho")
    }
}

/// Plain HTTP fetch of marketplace pages, no intermediary. Free and fast
/// when it works; the first strategy to hit the anti-bot wall when it
/// doesn't.
pub struct DirectAdapter {
    client: reqwest::Client,
    config: DirectConfig,
    marketplace: MarketplaceConfig,
    mode: DirectMode,
}

impl DirectAdapter {
    pub fn new(
        client: reqwest::Client,
        config: DirectConfig,
        marketplace: MarketplaceConfig,
        mode: DirectMode,
    ) -> Self {
        Self {
            client,
            config,
            marketplace,
            mode,
        }
    }

    /// GET with retries and exponential backoff. Transient network errors
    /// are retried; a successfully delivered challenge page is not an error
    /// here, the block detector deals with that downstream.
    async fn get_with_retries(&self, url: &str) -> Result<String> {
        let mut last_err = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                debug!(attempt, ?backoff, "retrying direct fetch");
                tokio::time::sleep(backoff).await;
            }
            match self.try_get(url).await {
                Ok(body) => return Ok(body),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or(crate::error::RateError::NoData))
    }

    async fn try_get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    /// Resolve a hotel to its listing URL via the marketplace's own
    /// autocomplete endpoint, the same call its search box makes.
    async fn resolve_listing(&self, request: &AcquisitionRequest) -> Result<Option<String>> {
        let url = format!(
            "{}/autocomplete/api/v1/results",
            self.marketplace.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .query(&[("query", request.search_term()), ("language", "en-us".into())])
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?
            .error_for_status()?;
        let parsed: AutocompleteResponse = response.json().await?;

        Ok(parsed
            .results
            .into_iter()
            .find(|hit| hit.is_hotel())
            .and_then(|hit| hit.b_hotel_url))
    }
}

#[async_trait]
impl PriceSource for DirectAdapter {
    fn strategy(&self) -> StrategyKind {
        match self.mode {
            DirectMode::ListingOnly => StrategyKind::DirectUrl,
            DirectMode::SearchFallback => StrategyKind::DirectFetch,
        }
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        let strategy = self.strategy();

        let target = match (self.mode, &request.listing_url) {
            (DirectMode::ListingOnly, Some(listing)) => listing_url_with_stay(listing, request)?,
            (DirectMode::ListingOnly, None) => {
                // Nothing to fetch without a stored URL; the waterfall
                // moves on to the search-based strategies.
                return Ok(Vec::new());
            }
            (DirectMode::SearchFallback, _) => match self.resolve_listing(request).await? {
                Some(listing) => listing_url_with_stay(&listing, request)?,
                None => search_url(&self.marketplace, request)?,
            },
        };

        let body = self.get_with_retries(target.as_str()).await?;
        debug!(%strategy, bytes = body.len(), "direct fetch returned page");
        Ok(vec![RawContent::markup(strategy, body)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autocomplete_hit_hotel_detection() {
        let by_dest = AutocompleteHit {
            dest_type: Some("hotel".into()),
            kind: None,
            b_hotel_url: Some("https://example/hotel.html".into()),
        };
        assert!(by_dest.is_hotel());

        let by_kind = AutocompleteHit {
            dest_type: None,
            kind: Some("ho".into()),
            b_hotel_url: None,
        };
        assert!(by_kind.is_hotel());

        let city = AutocompleteHit {
            dest_type: Some("city".into()),
            kind: Some("ci".into()),
            b_hotel_url: None,
        };
        assert!(!city.is_hotel());
    }

    #[test]
    fn modes_report_distinct_strategies() {
        let client = reqwest::Client::new();
        let fast = DirectAdapter::new(
            client.clone(),
            DirectConfig::default(),
            MarketplaceConfig::default(),
            DirectMode::ListingOnly,
        );
        assert_eq!(fast.strategy(), StrategyKind::DirectUrl);

        let fallback = DirectAdapter::new(
            client,
            DirectConfig::default(),
            MarketplaceConfig::default(),
            DirectMode::SearchFallback,
        );
        assert_eq!(fallback.strategy(), StrategyKind::DirectFetch);
    }

    #[tokio::test]
    async fn listing_only_mode_skips_without_url() {
        let adapter = DirectAdapter::new(
            reqwest::Client::new(),
            DirectConfig::default(),
            MarketplaceConfig::default(),
            DirectMode::ListingOnly,
        );
        let request = AcquisitionRequest::new(
            "Hotel",
            "City",
            "2026-09-01".parse().unwrap(),
            "2026-09-02".parse().unwrap(),
        )
        .unwrap();
        let contents = adapter.fetch(&request).await.unwrap();
        assert!(contents.is_empty());
    }
}
