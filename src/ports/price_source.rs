use async_trait::async_trait;

use crate::domain::content::RawContent;
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;

/// One way of obtaining raw marketplace content for a request.
///
/// Adapters stay dumb on purpose: they fetch and return raw payloads, and
/// the orchestrator owns block detection, parsing, and validation so every
/// strategy's output goes through the same checks.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn strategy(&self) -> StrategyKind;

    /// Whether the adapter has the credentials/configuration it needs.
    /// Unconfigured sources are skipped by the waterfall, not errors.
    fn is_configured(&self) -> bool {
        true
    }

    /// Fetch raw content for the request. An empty vec means the source had
    /// nothing for this request (as opposed to failing); the waterfall
    /// treats both the same way and moves on.
    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>>;
}
