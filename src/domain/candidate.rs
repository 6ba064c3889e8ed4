use serde::{Deserialize, Serialize};

use crate::domain::strategy::StrategyKind;

/// Coarse room classification derived from the free-text room label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomTier {
    Economy,
    Standard,
    Superior,
    Deluxe,
    Suite,
    Other,
}

impl RoomTier {
    /// Case-insensitive substring match over the label, including the Hebrew
    /// variants the marketplace serves for local properties.
    pub fn classify(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains("suite") || lower.contains("סוויטה") {
            Self::Suite
        } else if lower.contains("deluxe") || lower.contains("דלוקס") {
            Self::Deluxe
        } else if lower.contains("superior") || lower.contains("סופריור") {
            Self::Superior
        } else if lower.contains("economy") || lower.contains("budget") {
            Self::Economy
        } else if lower.contains("standard") || lower.contains("room") {
            Self::Standard
        } else {
            Self::Other
        }
    }
}

/// One extracted price observation, not yet deduplicated. Several candidates
/// may describe the same physical room at different text offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceCandidate {
    pub amount: f64,
    pub currency: String,
    pub room_label: String,
    pub tier: RoomTier,
    pub breakfast_included: bool,
    pub available: bool,
    pub rooms_left: Option<u32>,
    pub original_amount: Option<f64>,
    pub strategy: StrategyKind,
}

impl PriceCandidate {
    pub fn new(amount: f64, currency: &str, room_label: &str, strategy: StrategyKind) -> Self {
        Self {
            amount,
            currency: currency.to_string(),
            tier: RoomTier::classify(room_label),
            room_label: room_label.to_string(),
            breakfast_included: false,
            available: true,
            rooms_left: None,
            original_amount: None,
            strategy,
        }
    }

    #[must_use]
    pub fn with_breakfast(mut self, breakfast: bool) -> Self {
        self.breakfast_included = breakfast;
        self
    }
}
