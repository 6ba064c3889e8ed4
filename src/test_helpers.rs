//! Shared test doubles. Compiled into the crate so integration tests can
//! use them too; not part of the public API surface.
#![doc(hidden)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

type Responder = Box<dyn Fn() -> Result<Vec<RawContent>> + Send>;

/// Scriptable [`PriceSource`] for waterfall tests: a fixed strategy kind,
/// a closure producing each fetch result, an optional artificial delay,
/// and a call counter for asserting short-circuit behavior.
pub struct MockPriceSource {
    strategy: StrategyKind,
    configured: bool,
    responder: Mutex<Responder>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockPriceSource {
    pub fn returning(
        strategy: StrategyKind,
        responder: impl Fn() -> Result<Vec<RawContent>> + Send + 'static,
    ) -> Self {
        Self {
            strategy,
            configured: true,
            responder: Mutex::new(Box::new(responder)),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source the orchestrator must skip without calling.
    pub fn unconfigured(strategy: StrategyKind) -> Self {
        let mut mock = Self::returning(strategy, || Ok(Vec::new()));
        mock.configured = false;
        mock
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Handle onto the call counter, usable after the mock moves into the
    /// orchestrator.
    pub fn call_count_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn fetch(&self, _request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let responder = self.responder.lock().unwrap_or_else(|e| e.into_inner());
        responder()
    }
}

/// A markup page long enough to pass the minimum-length block heuristic,
/// with the given listing card embedded.
pub fn long_page(card: &str) -> String {
    let mut body = String::from(card);
    while body.len() < 5000 {
        body.push_str("<div>filler listing content for page length</div>");
    }
    body
}
