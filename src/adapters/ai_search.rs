use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::classify_send_error;
use crate::config::types::AiSearchConfig;
use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    api_key: &'a str,
    query: String,
    search_depth: &'static str,
    include_domains: Vec<String>,
    include_raw_content: bool,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    raw_content: Option<String>,
}

/// AI-assisted web search scoped to the marketplace domain. Returns page
/// summaries as markdown-ish text; prices show up often enough to make
/// this the cheapest strategy that dodges the marketplace's anti-bot wall
/// entirely, since the search provider does the crawling.
pub struct AiSearchAdapter {
    client: reqwest::Client,
    config: AiSearchConfig,
    marketplace_domain: String,
}

impl AiSearchAdapter {
    pub fn new(client: reqwest::Client, config: AiSearchConfig, marketplace_domain: String) -> Self {
        Self {
            client,
            config,
            marketplace_domain,
        }
    }

    fn query(&self, request: &AcquisitionRequest) -> String {
        format!(
            "{} prices {} to {}",
            request.search_term(),
            request.check_in,
            request.check_out
        )
    }
}

#[async_trait]
impl PriceSource for AiSearchAdapter {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::AiSearch
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let body = SearchBody {
            api_key,
            query: self.query(request),
            search_depth: "advanced",
            include_domains: vec![self.marketplace_domain.clone()],
            include_raw_content: true,
            max_results: self.config.max_results,
        };

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?
            .error_for_status()?;
        let parsed: SearchResponse = response.json().await?;

        let contents: Vec<RawContent> = parsed
            .results
            .into_iter()
            .filter_map(|hit| hit.raw_content.or(hit.content))
            .filter(|body| !body.trim().is_empty())
            .map(|body| RawContent::markdown(StrategyKind::AiSearch, body))
            .collect();

        debug!(results = contents.len(), "ai search returned content");
        Ok(contents)
    }
}
