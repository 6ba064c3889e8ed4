use crate::config::types::DetectionConfig;
use crate::domain::content::{Payload, RawContent};

/// Heuristic challenge-page classifier. Runs before price extraction so a
/// blocked attempt becomes a clean "no data" instead of feeding a CAPTCHA
/// wall into the parser.
#[derive(Debug, Clone)]
pub struct BlockDetector {
    markers: Vec<String>,
    min_page_len: usize,
}

impl BlockDetector {
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            markers: config.markers.iter().map(|m| m.to_lowercase()).collect(),
            min_page_len: config.min_page_len,
        }
    }

    /// Returns the marker that tripped, or `None` if the content is usable.
    ///
    /// The minimum-length heuristic applies only to full-page markup;
    /// markdown summaries from search collaborators are legitimately short,
    /// and structured records are never challenge pages.
    pub fn classify(&self, content: &RawContent) -> Option<String> {
        let body = match &content.payload {
            Payload::Markup(body) => {
                if body.len() < self.min_page_len {
                    return Some(format!("page shorter than {} chars", self.min_page_len));
                }
                body
            }
            Payload::Markdown(body) => body,
            Payload::StructuredRecords(_) => return None,
        };

        let lower = body.to_lowercase();
        self.markers.iter().find(|m| lower.contains(m.as_str())).cloned()
    }

    pub fn is_blocked(&self, content: &RawContent) -> bool {
        self.classify(content).is_some()
    }
}

impl Default for BlockDetector {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}
