use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::adapters::classify_send_error;
use crate::config::types::SearchApiConfig;
use crate::error::{RateError, Result};

#[derive(Debug, Deserialize)]
struct SessionResponse {
    token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Caches the structured-search collaborator's session token across
/// requests. The exchange is the expensive part of that strategy, so the
/// token is reused until shortly before expiry; the refresh margin keeps a
/// token from expiring mid-request.
pub struct SessionTokenManager {
    client: reqwest::Client,
    auth_url: String,
    api_key: String,
    ttl: Duration,
    margin: Duration,
    request_timeout: Duration,
    cached: RwLock<Option<(String, Instant)>>,
}

impl SessionTokenManager {
    pub fn new(client: reqwest::Client, config: &SearchApiConfig, api_key: String) -> Self {
        Self {
            client,
            auth_url: format!("{}/v1/auth/session", config.base_url.trim_end_matches('/')),
            api_key,
            ttl: Duration::from_secs(config.token_ttl_secs),
            margin: Duration::from_secs(config.token_refresh_margin_secs),
            request_timeout: Duration::from_secs(config.timeout_secs),
            cached: RwLock::new(None),
        }
    }

    /// A token valid for at least the refresh margin, exchanging the API
    /// key for a fresh one when needed. The write lock is held across the
    /// exchange so concurrent callers don't stampede the auth endpoint.
    pub async fn token(&self) -> Result<String> {
        if let Some(token) = self.fresh_cached().await {
            return Ok(token);
        }

        let mut guard = self.cached.write().await;
        // Another caller may have refreshed while we waited for the lock.
        if let Some((token, expiry)) = guard.as_ref()
            && Instant::now() + self.margin < *expiry
        {
            return Ok(token.clone());
        }

        debug!("exchanging api key for a new session token");
        let response = self
            .client
            .post(&self.auth_url)
            .timeout(self.request_timeout)
            .json(&serde_json::json!({ "api_key": self.api_key }))
            .send()
            .await
            .map_err(|e| classify_send_error(e, self.request_timeout.as_secs()))?
            .error_for_status()?;
        let session: SessionResponse = response.json().await?;
        if session.token.is_empty() {
            return Err(RateError::Parse {
                reason: "auth endpoint returned an empty session token".into(),
            });
        }

        let ttl = session.expires_in.map(Duration::from_secs).unwrap_or(self.ttl);
        *guard = Some((session.token.clone(), Instant::now() + ttl));
        Ok(session.token)
    }

    /// Drop the cached token, forcing a fresh exchange on next use. Called
    /// when the collaborator rejects a token before its advertised expiry.
    pub async fn invalidate(&self) {
        *self.cached.write().await = None;
    }

    async fn fresh_cached(&self) -> Option<String> {
        let guard = self.cached.read().await;
        guard.as_ref().and_then(|(token, expiry)| {
            (Instant::now() + self.margin < *expiry).then(|| token.clone())
        })
    }
}
