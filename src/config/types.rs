use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub ai_search: AiSearchConfig,
    #[serde(default)]
    pub search_api: SearchApiConfig,
    #[serde(default)]
    pub unblocker: UnblockerConfig,
    #[serde(default)]
    pub direct: DirectConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

impl Config {
    /// Overlay collaborator credentials from the environment. Absence of a
    /// credential is not an error; the orchestrator skips that strategy.
    pub fn overlay_env(&mut self) {
        overlay(&mut self.ai_search.api_key, "AI_SEARCH_API_KEY");
        overlay(&mut self.search_api.api_key, "HOTEL_SEARCH_API_KEY");
        overlay(&mut self.unblocker.api_key, "UNBLOCKER_API_KEY");
        overlay(&mut self.browser.api_token, "BROWSER_API_TOKEN");
        overlay(&mut self.browser.proxy_host, "RESIDENTIAL_PROXY_HOST");
        overlay(&mut self.browser.proxy_port, "RESIDENTIAL_PROXY_PORT");
        overlay(&mut self.browser.proxy_username, "RESIDENTIAL_PROXY_USERNAME");
        overlay(&mut self.browser.proxy_password, "RESIDENTIAL_PROXY_PASSWORD");
    }
}

fn overlay(slot: &mut Option<String>, var: &str) {
    if let Ok(value) = std::env::var(var)
        && !value.is_empty()
    {
        *slot = Some(value);
    }
}

/// Target marketplace endpoints and request framing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarketplaceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            currency: default_currency(),
            user_agent: default_user_agent(),
        }
    }
}

/// Sanity bounds for extracted amounts and the dedup tolerance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidationConfig {
    #[serde(default = "default_min_price")]
    pub min_price: f64,
    #[serde(default = "default_max_price")]
    pub max_price: f64,
    #[serde(default = "default_dedup_tolerance")]
    pub dedup_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_price: default_min_price(),
            max_price: default_max_price(),
            dedup_tolerance: default_dedup_tolerance(),
        }
    }
}

/// Challenge-page heuristics. Tuned against the marketplace's current
/// markup; the site's anti-bot behavior drifts, hence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DetectionConfig {
    #[serde(default = "default_block_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_min_page_len")]
    pub min_page_len: usize,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            markers: default_block_markers(),
            min_page_len: default_min_page_len(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiSearchConfig {
    #[serde(default = "default_ai_search_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ai_max_results")]
    pub max_results: u32,
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

impl Default for AiSearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_search_url(),
            api_key: None,
            max_results: default_ai_max_results(),
            timeout_secs: default_ai_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchApiConfig {
    #[serde(default = "default_search_api_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Safety margin: refresh the session token this long before expiry.
    #[serde(default = "default_token_margin")]
    pub token_refresh_margin_secs: u64,
    #[serde(default = "default_search_api_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_api_url(),
            api_key: None,
            token_ttl_secs: default_token_ttl(),
            token_refresh_margin_secs: default_token_margin(),
            timeout_secs: default_search_api_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnblockerConfig {
    #[serde(default = "default_unblocker_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_true")]
    pub render: bool,
    #[serde(default = "default_unblocker_timeout")]
    pub timeout_secs: u64,
}

impl Default for UnblockerConfig {
    fn default() -> Self {
        Self {
            base_url: default_unblocker_url(),
            api_key: None,
            country_code: default_country_code(),
            render: true,
            timeout_secs: default_unblocker_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DirectConfig {
    #[serde(default = "default_direct_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_direct_timeout(),
            max_retries: default_retries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrowserConfig {
    #[serde(default = "default_browser_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub proxy_host: Option<String>,
    #[serde(default = "default_proxy_port")]
    pub proxy_port: Option<String>,
    #[serde(default)]
    pub proxy_username: Option<String>,
    #[serde(default)]
    pub proxy_password: Option<String>,
    /// Extra settle time after navigation for dynamic price widgets.
    #[serde(default = "default_browser_wait_ms")]
    pub wait_ms: u64,
    #[serde(default = "default_browser_timeout")]
    pub timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: default_browser_url(),
            api_token: None,
            proxy_host: None,
            proxy_port: default_proxy_port(),
            proxy_username: None,
            proxy_password: None,
            wait_ms: default_browser_wait_ms(),
            timeout_secs: default_browser_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.booking.com".into()
}

fn default_currency() -> String {
    "ILS".into()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".into()
}

fn default_min_price() -> f64 {
    50.0
}

fn default_max_price() -> f64 {
    50_000.0
}

fn default_dedup_tolerance() -> f64 {
    10.0
}

fn default_block_markers() -> Vec<String> {
    ["captcha", "access denied", "are you a robot", "verify you are human"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_min_page_len() -> usize {
    5000
}

fn default_ai_search_url() -> String {
    "https://api.tavily.com".into()
}

fn default_ai_max_results() -> u32 {
    5
}

fn default_ai_timeout() -> u64 {
    20
}

fn default_search_api_url() -> String {
    "https://api.hotelsearch.example".into()
}

fn default_token_ttl() -> u64 {
    3600
}

fn default_token_margin() -> u64 {
    120
}

fn default_search_api_timeout() -> u64 {
    30
}

fn default_unblocker_url() -> String {
    "https://api.scraperapi.com".into()
}

fn default_country_code() -> String {
    "il".into()
}

fn default_true() -> bool {
    true
}

fn default_unblocker_timeout() -> u64 {
    45
}

fn default_direct_timeout() -> u64 {
    15
}

fn default_retries() -> u32 {
    2
}

fn default_browser_url() -> String {
    "https://browser.example.io".into()
}

fn default_proxy_port() -> Option<String> {
    Some("22225".into())
}

fn default_browser_wait_ms() -> u64 {
    5000
}

fn default_browser_timeout() -> u64 {
    45
}
