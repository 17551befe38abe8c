//! Token ownership and refresh.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use core_async::sync::Mutex;
use core_http::{fetch_json, RequestBody};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::types::Tokens;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire shape of a refresh-grant response. The endpoint may omit the
/// refresh token; the previous one stays valid then.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default = "crate::types::default_expires_in")]
    expires_in: i64,
}

/// Owns a token set and hands out a usable bearer credential.
///
/// [`access_token`](TokenManager::access_token) is the single entry point
/// every API operation uses. The internal lock is held across the staleness
/// check and the refresh exchange, so concurrent callers on a stale token
/// coalesce onto one network refresh and all observe the resulting
/// credential.
pub struct TokenManager {
    http: Arc<dyn HttpClient>,
    config: AuthConfig,
    tokens: Mutex<Tokens>,
    timeout: Duration,
}

impl TokenManager {
    /// Wraps a token set obtained from [`DeviceCodeFlow`](crate::DeviceCodeFlow)
    /// or deserialized from the host's secret store.
    pub fn new(http: Arc<dyn HttpClient>, config: AuthConfig, tokens: Tokens) -> Self {
        Self {
            http,
            config,
            tokens: Mutex::new(tokens),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout for refresh exchanges.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The cached access token if still valid. Never performs I/O.
    pub async fn cached_access_token(&self) -> Option<String> {
        self.tokens
            .lock()
            .await
            .cached_access_token()
            .map(str::to_owned)
    }

    /// Snapshot of the current token set, for persistence by the caller.
    pub async fn snapshot(&self) -> Tokens {
        self.tokens.lock().await.clone()
    }

    /// Returns a usable bearer credential, refreshing first when the cached
    /// one is missing or inside the expiry buffer.
    #[instrument(skip(self))]
    pub async fn access_token(&self) -> Result<String> {
        let mut tokens = self.tokens.lock().await;

        if let Some(token) = tokens.cached_access_token() {
            debug!("access token still valid, no refresh needed");
            return Ok(token.to_owned());
        }

        info!("access token missing or expiring, refreshing");
        let (access_token, refreshed) = self.exchange_refresh_token(&tokens.refresh_token).await?;

        // Single assignment: credentials and expiry replace together
        *tokens = refreshed;

        Ok(access_token)
    }

    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<(String, Tokens)> {
        let body = RequestBody::form([
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
        ]);
        let request = body.apply(
            HttpRequest::new(HttpMethod::Post, self.config.token_url.clone())
                .timeout(self.timeout),
        )?;

        let response: RefreshResponse = fetch_json(self.http.as_ref(), request)
            .await
            .map_err(AuthError::from_exchange)?;

        info!(expires_in = response.expires_in, "token refresh succeeded");

        let refresh_token = response
            .refresh_token
            .unwrap_or_else(|| refresh_token.to_owned());
        let access_token = response.access_token.clone();
        let tokens = Tokens::new(response.access_token, refresh_token, response.expires_in);

        Ok((access_token, tokens))
    }
}
