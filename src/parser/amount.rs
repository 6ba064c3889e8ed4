use crate::config::types::ValidationConfig;

/// Sanity bounds for a nightly price in the property's local currency.
/// The primary defense against misparsed dates, counts, and IDs being
/// mistaken for prices.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, amount: f64) -> bool {
        amount.is_finite() && amount >= self.min && amount <= self.max
    }
}

impl From<&ValidationConfig> for Bounds {
    fn from(config: &ValidationConfig) -> Self {
        Self::new(config.min_price, config.max_price)
    }
}

/// Parse a numeric price string as scraped: grouping commas, regular or
/// non-breaking spaces. Returns `None` for anything that is not a plain
/// positive number after stripping.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}' | '\u{202f}'))
        .collect();
    let amount: f64 = cleaned.parse().ok()?;
    if amount.is_finite() && amount > 0.0 {
        Some(amount)
    } else {
        None
    }
}
