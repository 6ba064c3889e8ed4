use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::adapters::classify_send_error;
use crate::adapters::shared::SessionTokenManager;
use crate::config::types::SearchApiConfig;
use crate::domain::content::{RawContent, RoomRecord};
use crate::domain::request::AcquisitionRequest;
use crate::domain::strategy::StrategyKind;
use crate::error::Result;
use crate::ports::PriceSource;

#[derive(Debug, Deserialize)]
struct HotelSearchResponse {
    #[serde(default)]
    hotels: Vec<HotelHit>,
}

#[derive(Debug, Deserialize)]
struct HotelHit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rooms: Vec<RoomHit>,
}

#[derive(Debug, Deserialize)]
struct RoomHit {
    #[serde(default, alias = "room_type")]
    name: Option<String>,
    price: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    rooms_left: Option<u32>,
    #[serde(default)]
    original_price: Option<f64>,
}

/// Structured hotel-search collaborator. The only strategy that returns
/// typed records instead of pages, and the only one with cross-request
/// state (the session token).
pub struct SearchApiAdapter {
    client: reqwest::Client,
    config: SearchApiConfig,
    tokens: Option<SessionTokenManager>,
}

impl SearchApiAdapter {
    pub fn new(client: reqwest::Client, config: SearchApiConfig) -> Self {
        let tokens = config
            .api_key
            .clone()
            .map(|key| SessionTokenManager::new(client.clone(), &config, key));
        Self {
            client,
            config,
            tokens,
        }
    }

    async fn search(&self, request: &AcquisitionRequest, token: &str) -> Result<reqwest::Response> {
        let url = format!("{}/v1/hotels/search", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .bearer_auth(token)
            .query(&[
                ("query", request.search_term()),
                ("check_in", request.check_in.to_string()),
                ("check_out", request.check_out.to_string()),
                ("adults", request.adults.to_string()),
                ("currency", request.currency.clone()),
            ])
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.config.timeout_secs))?;
        Ok(response)
    }

    fn matching_records(&self, parsed: HotelSearchResponse, request: &AcquisitionRequest) -> Vec<RoomRecord> {
        let wanted = normalize(&request.hotel_name);
        parsed
            .hotels
            .into_iter()
            .filter(|hotel| {
                let name = normalize(&hotel.name);
                name.contains(&wanted) || wanted.contains(&name)
            })
            .flat_map(|hotel| hotel.rooms)
            .map(|room| RoomRecord {
                name: room.name,
                price: room.price,
                currency: room.currency,
                available: room.available,
                rooms_left: room.rooms_left,
                original_price: room.original_price,
            })
            .collect()
    }
}

/// Lowercased, alphanumeric-and-spaces-only form of a hotel name, so
/// "The Montefiore Hotel" still matches "Montefiore hotel, Tel Aviv".
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl PriceSource for SearchApiAdapter {
    fn strategy(&self) -> StrategyKind {
        StrategyKind::SearchApi
    }

    fn is_configured(&self) -> bool {
        self.tokens.is_some()
    }

    async fn fetch(&self, request: &AcquisitionRequest) -> Result<Vec<RawContent>> {
        let Some(tokens) = &self.tokens else {
            return Ok(Vec::new());
        };

        let token = tokens.token().await?;
        let mut response = self.search(request, &token).await?;

        // A rejected token before its advertised expiry means the session
        // was revoked server-side; retry once with a fresh one.
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("session token rejected, refreshing");
            tokens.invalidate().await;
            let token = tokens.token().await?;
            response = self.search(request, &token).await?;
        }

        let parsed: HotelSearchResponse = response.error_for_status()?.json().await?;
        let records = self.matching_records(parsed, request);
        if records.is_empty() {
            debug!(hotel = %request.hotel_name, "no matching hotel in search results");
            return Ok(Vec::new());
        }
        Ok(vec![RawContent::records(StrategyKind::SearchApi, records)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("The Montefiore, Hotel!"), "the montefiore hotel");
        assert_eq!(normalize("  Hotel   Montefiore "), "hotel montefiore");
    }

    #[test]
    fn unconfigured_without_api_key() {
        let adapter = SearchApiAdapter::new(reqwest::Client::new(), SearchApiConfig::default());
        assert!(!adapter.is_configured());
    }

    #[test]
    fn matching_filters_by_hotel_name() {
        let config = SearchApiConfig {
            api_key: Some("key".into()),
            ..SearchApiConfig::default()
        };
        let adapter = SearchApiAdapter::new(reqwest::Client::new(), config);
        let request = AcquisitionRequest::new(
            "Montefiore",
            "Tel Aviv",
            "2026-09-01".parse().unwrap(),
            "2026-09-02".parse().unwrap(),
        )
        .unwrap();

        let parsed = HotelSearchResponse {
            hotels: vec![
                HotelHit {
                    name: "The Montefiore Hotel".into(),
                    rooms: vec![RoomHit {
                        name: Some("Deluxe Room".into()),
                        price: Some(620.0),
                        currency: Some("ILS".into()),
                        available: Some(true),
                        rooms_left: None,
                        original_price: None,
                    }],
                },
                HotelHit {
                    name: "Some Other Place".into(),
                    rooms: vec![RoomHit {
                        name: None,
                        price: Some(100.0),
                        currency: None,
                        available: None,
                        rooms_left: None,
                        original_price: None,
                    }],
                },
            ],
        };
        let records = adapter.matching_records(parsed, &request);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_deref(), Some("Deluxe Room"));
        assert_eq!(records[0].price, Some(620.0));
    }
}
