use thiserror::Error;

#[derive(Error, Debug)]
pub enum RateError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("strategy timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("challenge page detected: {marker}")]
    Blocked { marker: String },

    #[error("no price data in response")]
    NoData,

    #[error("failed to parse response: {reason}")]
    Parse { reason: String },

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, RateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_display_carries_marker() {
        let err = RateError::Blocked {
            marker: "captcha".into(),
        };
        assert!(err.to_string().contains("captcha"));
    }

    #[test]
    fn timeout_display() {
        let err = RateError::Timeout { secs: 30 };
        let msg = err.to_string();
        assert!(msg.contains("30"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn parse_error_display() {
        let err = RateError::Parse {
            reason: "missing price field".into(),
        };
        assert!(err.to_string().contains("missing price field"));
    }

    #[test]
    fn invalid_request_display() {
        let err = RateError::InvalidRequest {
            reason: "empty hotel name".into(),
        };
        assert!(err.to_string().contains("empty hotel name"));
    }

    #[test]
    fn error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{{invalid").unwrap_err();
        let err: RateError = json_err.into();
        assert!(matches!(err, RateError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }
}
