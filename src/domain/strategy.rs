use serde::{Deserialize, Serialize};

/// One acquisition method in the waterfall. Declaration order here matches
/// the default priority order: cheapest and most reliable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Fetch a listing URL the caller already knows, skipping search.
    DirectUrl,
    /// Generative search service restricted to the marketplace domain.
    AiSearch,
    /// Structured hotel-search API returning typed listing records.
    SearchApi,
    /// Third-party rendering/unblocking proxy.
    Unblocker,
    /// Plain HTTP GET against public autocomplete and listing endpoints.
    DirectFetch,
    /// Remote browser automation behind a residential proxy. Last resort.
    Browser,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectUrl => "direct_url",
            Self::AiSearch => "ai_search",
            Self::SearchApi => "search_api",
            Self::Unblocker => "unblocker",
            Self::DirectFetch => "direct_fetch",
            Self::Browser => "browser",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(StrategyKind::AiSearch.to_string(), "ai_search");
        assert_eq!(StrategyKind::Browser.as_str(), "browser");
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&StrategyKind::SearchApi).unwrap();
        assert_eq!(json, "\"search_api\"");
        let back: StrategyKind = serde_json::from_str("\"direct_url\"").unwrap();
        assert_eq!(back, StrategyKind::DirectUrl);
    }
}
