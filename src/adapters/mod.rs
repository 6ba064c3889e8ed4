pub mod ai_search;
pub mod browser;
pub mod direct;
pub mod search_api;
pub mod shared;
pub mod unblocker;

use url::Url;

use crate::config::types::MarketplaceConfig;
use crate::domain::request::AcquisitionRequest;
use crate::error::{RateError, Result};

/// Marketplace search-results URL for a stay. Every adapter that scrapes
/// the search page goes through here so stay parameters stay consistent.
pub fn search_url(marketplace: &MarketplaceConfig, request: &AcquisitionRequest) -> Result<Url> {
    let mut url = Url::parse(&marketplace.base_url)?;
    url.set_path("/searchresults.html");
    append_stay_params(&mut url, request);
    url.query_pairs_mut().append_pair("ss", &request.search_term());
    Ok(url)
}

/// A known listing URL with the request's stay parameters appended. The
/// stored listing URL carries no dates, so prices only appear once these
/// are added.
pub fn listing_url_with_stay(listing_url: &str, request: &AcquisitionRequest) -> Result<Url> {
    let mut url = Url::parse(listing_url)?;
    append_stay_params(&mut url, request);
    Ok(url)
}

fn append_stay_params(url: &mut Url, request: &AcquisitionRequest) {
    url.query_pairs_mut()
        .append_pair("checkin", &request.check_in.to_string())
        .append_pair("checkout", &request.check_out.to_string())
        .append_pair("group_adults", &request.adults.to_string())
        .append_pair("no_rooms", "1")
        .append_pair("selected_currency", &request.currency);
}

/// Shared HTTP client wired the way the marketplace expects: a desktop
/// user agent and a cookie jar, since the site sets session cookies on
/// first contact. Deadlines are applied per request, since each strategy
/// carries its own budget.
pub fn http_client(marketplace: &MarketplaceConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(marketplace.user_agent.clone())
        .cookie_store(true)
        .build()?;
    Ok(client)
}

/// Fold a transport failure into the error taxonomy: a request that hit
/// its client-side deadline is a `Timeout`, everything else stays a
/// network error.
pub(crate) fn classify_send_error(err: reqwest::Error, timeout_secs: u64) -> RateError {
    if err.is_timeout() {
        RateError::Timeout { secs: timeout_secs }
    } else {
        RateError::Http(err)
    }
}
