use serde::{Deserialize, Serialize};

use crate::domain::strategy::StrategyKind;

/// One listing record from a structured-search collaborator. Already shaped,
/// so the parser maps fields directly instead of pattern matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomRecord {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub available: Option<bool>,
    pub rooms_left: Option<u32>,
    /// Struck-through pre-discount price when the collaborator reports one.
    pub original_price: Option<f64>,
}

/// The shape of a collaborator's raw payload. A closed set: the parser
/// matches exhaustively, so a new collaborator shape means a new variant
/// plus one handler, never ad-hoc sniffing.
#[derive(Debug, Clone)]
pub enum Payload {
    Markup(String),
    Markdown(String),
    StructuredRecords(Vec<RoomRecord>),
}

/// Unparsed content as produced by one strategy adapter. Transient: fed to
/// the block detector and price parser, then discarded.
#[derive(Debug, Clone)]
pub struct RawContent {
    pub strategy: StrategyKind,
    pub payload: Payload,
}

impl RawContent {
    pub fn markup(strategy: StrategyKind, body: impl Into<String>) -> Self {
        Self {
            strategy,
            payload: Payload::Markup(body.into()),
        }
    }

    pub fn markdown(strategy: StrategyKind, body: impl Into<String>) -> Self {
        Self {
            strategy,
            payload: Payload::Markdown(body.into()),
        }
    }

    pub fn records(strategy: StrategyKind, records: Vec<RoomRecord>) -> Self {
        Self {
            strategy,
            payload: Payload::StructuredRecords(records),
        }
    }

    /// Character length of the textual payload; record lists report their count.
    pub fn len(&self) -> usize {
        match &self.payload {
            Payload::Markup(s) | Payload::Markdown(s) => s.len(),
            Payload::StructuredRecords(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_len() {
        let c = RawContent::markup(StrategyKind::DirectFetch, "<html></html>");
        assert_eq!(c.len(), 13);
        assert!(!c.is_empty());
    }

    #[test]
    fn records_len_counts_records() {
        let c = RawContent::records(
            StrategyKind::SearchApi,
            vec![RoomRecord::default(), RoomRecord::default()],
        );
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn empty_markdown() {
        let c = RawContent::markdown(StrategyKind::AiSearch, "");
        assert!(c.is_empty());
    }
}
