pub mod types;

use std::path::Path;

use tracing::info;

use crate::error::{RateError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RateError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        serde_yml::from_str(&content)?
    } else {
        info!("Config file not found at {}, using defaults", path.display());
        Config::default()
    };
    config.overlay_env();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_config_missing_file_returns_defaults() {
        let result = load_config(Path::new("/tmp/nonexistent_ratewatch_config_12345.yaml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.detection.min_page_len, 5000);
    }

    #[test]
    fn load_config_valid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "marketplace:\n  currency: EUR\ndirect:\n  max_retries: 5\n  timeout_secs: 10"
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.marketplace.currency, "EUR");
        assert_eq!(config.direct.max_retries, 5);
        assert_eq!(config.direct.timeout_secs, 10);
    }

    #[test]
    fn load_config_partial_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "validation:\n  dedup_tolerance: 25").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert!((config.validation.dedup_tolerance - 25.0).abs() < f64::EPSILON);
        // Other sections get defaults
        assert_eq!(config.browser.wait_ms, 5000);
    }

    #[test]
    fn load_config_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "{{{{invalid yaml: [[[").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn load_config_credential_in_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "ai_search:\n  api_key: tvly-test-123").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.ai_search.api_key.as_deref(), Some("tvly-test-123"));
    }
}
