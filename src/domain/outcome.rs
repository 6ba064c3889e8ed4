use serde::{Deserialize, Serialize};

use crate::domain::candidate::PriceCandidate;
use crate::domain::strategy::StrategyKind;
use crate::error::RateError;

/// Why an acquisition (or a single strategy attempt) produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    NoData,
    Blocked,
    NetworkError,
    Timeout,
    AllStrategiesExhausted,
}

impl FailureKind {
    pub fn from_error(err: &RateError) -> Self {
        match err {
            RateError::Timeout { .. } => Self::Timeout,
            RateError::Blocked { .. } => Self::Blocked,
            RateError::Http(_) | RateError::Io(_) | RateError::Url(_) => Self::NetworkError,
            _ => Self::NoData,
        }
    }

    /// Diagnostic weight when picking which underlying reason to surface
    /// from an exhausted waterfall. Higher is more telling.
    pub fn diagnostic_rank(self) -> u8 {
        match self {
            Self::Blocked => 3,
            Self::Timeout => 2,
            Self::NetworkError => 1,
            Self::NoData | Self::AllStrategiesExhausted => 0,
        }
    }
}

/// The published outcome of one acquisition.
///
/// `success == true` implies a non-empty candidate list sorted cheapest
/// first; `success == false` implies an empty list and a failure kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionResult {
    pub success: bool,
    pub candidates: Vec<PriceCandidate>,
    /// The strategy that produced the data, when successful.
    pub strategy: Option<StrategyKind>,
    pub failure: Option<FailureKind>,
    /// Most diagnostic per-strategy reason behind an exhausted waterfall.
    pub failure_detail: Option<FailureKind>,
}

impl AcquisitionResult {
    pub fn success(strategy: StrategyKind, candidates: Vec<PriceCandidate>) -> Self {
        debug_assert!(!candidates.is_empty());
        Self {
            success: true,
            candidates,
            strategy: Some(strategy),
            failure: None,
            failure_detail: None,
        }
    }

    pub fn exhausted(detail: Option<FailureKind>) -> Self {
        Self {
            success: false,
            candidates: Vec::new(),
            strategy: None,
            failure: Some(FailureKind::AllStrategiesExhausted),
            failure_detail: detail,
        }
    }

    /// Cheapest validated candidate, the market price most callers want.
    pub fn best(&self) -> Option<&PriceCandidate> {
        self.candidates.first()
    }
}
