use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::adapters::ai_search::AiSearchAdapter;
use crate::adapters::browser::BrowserAdapter;
use crate::adapters::direct::{DirectAdapter, DirectMode};
use crate::adapters::http_client;
use crate::adapters::search_api::SearchApiAdapter;
use crate::adapters::unblocker::UnblockerAdapter;
use crate::canonical::canonicalize;
use crate::config::types::Config;
use crate::domain::outcome::{AcquisitionResult, FailureKind};
use crate::domain::request::AcquisitionRequest;
use crate::error::Result;
use crate::parser::amount::Bounds;
use crate::parser::block::BlockDetector;
use crate::parser::extract::extract_candidates;
use crate::ports::PriceSource;

/// Pause between requests in a batch scan. The strategies already pace
/// themselves per attempt; this keeps a competitor sweep from looking like
/// a burst to the marketplace.
pub const BATCH_PACING: Duration = Duration::from_millis(500);

struct StrategyEntry {
    source: Arc<dyn PriceSource>,
    timeout: Duration,
}

/// Runs the acquisition waterfall: strategies in fixed cheapest-first
/// order, each bounded by its own timeout, stopping at the first one that
/// yields validated prices.
pub struct Orchestrator {
    entries: Vec<StrategyEntry>,
    detector: BlockDetector,
    bounds: Bounds,
    dedup_tolerance: f64,
}

impl Orchestrator {
    /// Wire the full strategy table from configuration. Order is the cost
    /// order: known listing URL, AI search, structured search, unblocker
    /// proxy, plain fetch, headless browser.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(&config.marketplace)?;
        let marketplace_domain = url::Url::parse(&config.marketplace.base_url)?
            .host_str()
            .unwrap_or("booking.com")
            .trim_start_matches("www.")
            .to_string();

        let entries = vec![
            StrategyEntry {
                source: Arc::new(DirectAdapter::new(
                    client.clone(),
                    config.direct.clone(),
                    config.marketplace.clone(),
                    DirectMode::ListingOnly,
                )),
                timeout: Duration::from_secs(config.direct.timeout_secs),
            },
            StrategyEntry {
                source: Arc::new(AiSearchAdapter::new(
                    client.clone(),
                    config.ai_search.clone(),
                    marketplace_domain,
                )),
                timeout: Duration::from_secs(config.ai_search.timeout_secs),
            },
            StrategyEntry {
                source: Arc::new(SearchApiAdapter::new(client.clone(), config.search_api.clone())),
                timeout: Duration::from_secs(config.search_api.timeout_secs),
            },
            StrategyEntry {
                source: Arc::new(UnblockerAdapter::new(
                    client.clone(),
                    config.unblocker.clone(),
                    config.marketplace.clone(),
                )),
                timeout: Duration::from_secs(config.unblocker.timeout_secs),
            },
            StrategyEntry {
                source: Arc::new(DirectAdapter::new(
                    client.clone(),
                    config.direct.clone(),
                    config.marketplace.clone(),
                    DirectMode::SearchFallback,
                )),
                timeout: Duration::from_secs(config.direct.timeout_secs),
            },
            StrategyEntry {
                source: Arc::new(BrowserAdapter::new(
                    client,
                    config.browser.clone(),
                    config.marketplace.clone(),
                )),
                timeout: Duration::from_secs(config.browser.timeout_secs),
            },
        ];

        Ok(Self {
            entries,
            detector: BlockDetector::new(&config.detection),
            bounds: Bounds::from(&config.validation),
            dedup_tolerance: config.validation.dedup_tolerance,
        })
    }

    /// Hand-assembled table, used by tests and by callers that want a
    /// custom strategy mix.
    pub fn with_sources(
        sources: Vec<(Arc<dyn PriceSource>, Duration)>,
        detector: BlockDetector,
        bounds: Bounds,
        dedup_tolerance: f64,
    ) -> Self {
        Self {
            entries: sources
                .into_iter()
                .map(|(source, timeout)| StrategyEntry { source, timeout })
                .collect(),
            detector,
            bounds,
            dedup_tolerance,
        }
    }

    /// Run the waterfall for one request.
    ///
    /// A strategy "succeeds" only if its content survives block detection
    /// and yields at least one in-bounds candidate; anything else moves on
    /// to the next strategy. An exhausted run reports the most diagnostic
    /// per-strategy reason (a block outranks a timeout outranks a network
    /// error).
    pub async fn acquire(&self, request: &AcquisitionRequest) -> AcquisitionResult {
        let mut most_diagnostic: Option<FailureKind> = None;
        let record = |kind: FailureKind, best: &mut Option<FailureKind>| {
            if best.is_none_or(|b| kind.diagnostic_rank() > b.diagnostic_rank()) {
                *best = Some(kind);
            }
        };

        for entry in &self.entries {
            let strategy = entry.source.strategy();
            if !entry.source.is_configured() {
                debug!(%strategy, "strategy not configured, skipping");
                continue;
            }

            info!(%strategy, hotel = %request.hotel_name, "attempting strategy");
            let started = std::time::Instant::now();
            let contents = match tokio::time::timeout(entry.timeout, entry.source.fetch(request)).await {
                Err(_) => {
                    warn!(%strategy, timeout_secs = entry.timeout.as_secs(), "strategy timed out");
                    record(FailureKind::Timeout, &mut most_diagnostic);
                    continue;
                }
                Ok(Err(err)) => {
                    let kind = FailureKind::from_error(&err);
                    warn!(%strategy, error = %err, elapsed_ms = started.elapsed().as_millis() as u64, "strategy failed");
                    record(kind, &mut most_diagnostic);
                    continue;
                }
                Ok(Ok(contents)) => contents,
            };

            if contents.is_empty() {
                debug!(%strategy, "strategy returned no content");
                record(FailureKind::NoData, &mut most_diagnostic);
                continue;
            }

            let mut pool = Vec::new();
            let mut blocked = false;
            for content in &contents {
                if let Some(marker) = self.detector.classify(content) {
                    warn!(%strategy, %marker, "content looks like a challenge page");
                    blocked = true;
                    continue;
                }
                pool.extend(extract_candidates(content, self.bounds));
            }

            if pool.is_empty() {
                let kind = if blocked { FailureKind::Blocked } else { FailureKind::NoData };
                record(kind, &mut most_diagnostic);
                continue;
            }

            let result = canonicalize(pool, strategy, self.dedup_tolerance);
            info!(
                %strategy,
                candidates = result.candidates.len(),
                best = result.best().map(|c| c.amount),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "acquisition succeeded"
            );
            return result;
        }

        warn!(hotel = %request.hotel_name, detail = ?most_diagnostic, "all strategies exhausted");
        AcquisitionResult::exhausted(most_diagnostic)
    }

    /// Sequential batch scan with pacing between requests. One request's
    /// failure never aborts the batch.
    pub async fn acquire_batch(&self, requests: &[AcquisitionRequest]) -> Vec<AcquisitionResult> {
        let mut results = Vec::with_capacity(requests.len());
        for (i, request) in requests.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(BATCH_PACING).await;
            }
            results.push(self.acquire(request).await);
        }
        results
    }
}
