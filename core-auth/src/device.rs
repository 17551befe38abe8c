//! Device-code sign-in.
//!
//! Implements the OAuth 2.0 device authorization grant: the client obtains a
//! short user code, the host displays it, and the client polls the token
//! endpoint at the server-specified interval until the user approves on a
//! second device or the server rejects the grant.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use core_async::time::sleep;
use core_http::{fetch_json, RequestBody};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::types::{DeviceAuthorization, Tokens};

/// Error code the token endpoint returns while the user has not yet approved.
const AUTHORIZATION_PENDING: &str = "authorization_pending";

const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Wire shape of a device-grant success. The refresh token is required here:
/// the requested scope includes `offline_access`, and a sign-in without a
/// refresh credential would leave the account unusable after an hour.
#[derive(Debug, Deserialize)]
struct DeviceTokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default = "crate::types::default_expires_in")]
    expires_in: i64,
}

/// Drives one device-code sign-in attempt.
pub struct DeviceCodeFlow {
    http: Arc<dyn HttpClient>,
    config: AuthConfig,
    timeout: Duration,
}

impl DeviceCodeFlow {
    pub fn new(http: Arc<dyn HttpClient>, config: AuthConfig) -> Self {
        Self {
            http,
            config,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout. This bounds each HTTP call, not
    /// the overall sign-in.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the full sign-in: requests a device code, hands the verification
    /// URI and user code to `display` exactly once, then polls the token
    /// endpoint until the user approves or the server rejects the grant.
    ///
    /// Polls run strictly one at a time; while the server reports
    /// `authorization_pending` the loop sleeps for the server-specified
    /// interval and tries again, indefinitely. There is no overall deadline
    /// here; a caller wanting one wraps this future in a timeout.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Authentication`] when either endpoint rejects the
    ///   request (e.g. `authorization_declined`, `expired_token`)
    /// - [`AuthError::Http`] for transport and decoding failures
    #[instrument(skip(self, display), fields(client_id = %self.config.client_id))]
    pub async fn sign_in<F>(&self, display: F) -> Result<Tokens>
    where
        F: FnOnce(&str, &str),
    {
        let session = self.request_device_code().await?;
        info!(
            interval = session.interval,
            "device code issued, awaiting user approval"
        );

        display(&session.verification_uri, &session.user_code);

        let interval = session.poll_interval();
        loop {
            match self.poll_token(&session.device_code).await {
                Ok(tokens) => {
                    info!("device-code sign-in succeeded");
                    return Ok(tokens);
                }
                Err(err) if is_authorization_pending(&err) => {
                    debug!(
                        delay_secs = interval.as_secs_f64(),
                        "authorization pending, polling again after interval"
                    );
                    sleep(interval).await;
                }
                Err(err) => {
                    warn!(error = %err, "device-code sign-in failed");
                    return Err(err);
                }
            }
        }
    }

    async fn request_device_code(&self) -> Result<DeviceAuthorization> {
        let body = RequestBody::form([
            ("client_id", self.config.client_id.as_str()),
            ("scope", self.config.scope.as_str()),
        ]);
        let request = body.apply(
            HttpRequest::new(HttpMethod::Post, self.config.device_code_url.clone())
                .timeout(self.timeout),
        )?;

        fetch_json(self.http.as_ref(), request)
            .await
            .map_err(AuthError::from_exchange)
    }

    async fn poll_token(&self, device_code: &str) -> Result<Tokens> {
        let body = RequestBody::form([
            ("grant_type", DEVICE_GRANT_TYPE),
            ("client_id", self.config.client_id.as_str()),
            ("device_code", device_code),
        ]);
        let request = body.apply(
            HttpRequest::new(HttpMethod::Post, self.config.token_url.clone())
                .timeout(self.timeout),
        )?;

        let response: DeviceTokenResponse = fetch_json(self.http.as_ref(), request)
            .await
            .map_err(AuthError::from_exchange)?;

        Ok(Tokens::new(
            response.access_token,
            response.refresh_token,
            response.expires_in,
        ))
    }
}

fn is_authorization_pending(err: &AuthError) -> bool {
    matches!(err, AuthError::Authentication(api) if api.code() == Some(AUTHORIZATION_PENDING))
}
