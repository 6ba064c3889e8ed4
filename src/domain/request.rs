use chrono::NaiveDate;

use crate::error::{RateError, Result};

/// One price acquisition: one competitor hotel, one stay window.
/// Constructed per scan attempt and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AcquisitionRequest {
    pub hotel_name: String,
    pub city: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Marketplace listing URL when the competitor record already carries one.
    pub listing_url: Option<String>,
    pub adults: u8,
    pub currency: String,
}

impl AcquisitionRequest {
    pub fn new(
        hotel_name: impl Into<String>,
        city: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Self> {
        let hotel_name = hotel_name.into();
        let city = city.into();
        if hotel_name.trim().is_empty() {
            return Err(RateError::InvalidRequest {
                reason: "hotel name must not be empty".into(),
            });
        }
        if check_out <= check_in {
            return Err(RateError::InvalidRequest {
                reason: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }
        Ok(Self {
            hotel_name,
            city,
            check_in,
            check_out,
            listing_url: None,
            adults: 2,
            currency: "ILS".into(),
        })
    }

    #[must_use]
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_party(mut self, adults: u8) -> Self {
        self.adults = adults;
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Free-text term used by search-style collaborators.
    pub fn search_term(&self) -> String {
        if self.city.trim().is_empty() {
            self.hotel_name.clone()
        } else {
            format!("{} {}", self.hotel_name, self.city)
        }
    }
}
