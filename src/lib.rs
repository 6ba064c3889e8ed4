//! Competitor hotel price acquisition over a booking marketplace.
//!
//! The marketplace actively resists scraping, so no single access path is
//! reliable. The crate runs a waterfall of strategies ordered by cost —
//! stored listing URL, AI-assisted search, a structured search
//! collaborator, a proxy unblocker, a plain fetch, and finally a remote
//! headless browser — stopping at the first one that yields prices that
//! survive block detection, bounds validation, and dedup.

pub mod adapters;
pub mod canonical;
pub mod config;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod ports;
pub mod test_helpers;

pub use config::load_config;
pub use config::types::Config;
pub use domain::candidate::{PriceCandidate, RoomTier};
pub use domain::outcome::{AcquisitionResult, FailureKind};
pub use domain::request::AcquisitionRequest;
pub use domain::strategy::StrategyKind;
pub use error::{RateError, Result};
pub use orchestrator::Orchestrator;
pub use ports::PriceSource;
