use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds before the server-side expiry at which an access token is treated
/// as stale, so it is refreshed before the server actually invalidates it.
pub(crate) const EXPIRY_BUFFER_SECS: i64 = 300;

pub(crate) fn default_expires_in() -> i64 {
    3600
}

/// OAuth token set for one signed-in account.
///
/// The refresh token is the long-lived secret; the access token is the
/// short-lived bearer credential, absent (or stale) when a refresh is
/// required. Persistence is the caller's job: the type serializes with
/// serde and round-trips through whatever secret store the host uses.
///
/// # Security
///
/// Token values are never logged; the `Debug` implementation redacts them.
#[derive(Clone, Serialize, Deserialize)]
pub struct Tokens {
    /// Long-lived credential used to mint new access tokens
    pub refresh_token: String,
    /// Short-lived bearer credential for API requests
    pub access_token: Option<String>,
    /// When the access token expires (UTC, server-reported)
    pub expires_at: DateTime<Utc>,
}

impl Tokens {
    /// Builds a token set from a token-endpoint response.
    ///
    /// # Arguments
    ///
    /// * `access_token` - The bearer credential
    /// * `refresh_token` - The long-lived credential
    /// * `expires_in` - Seconds until the bearer credential expires
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            refresh_token,
            access_token: Some(access_token),
            expires_at: Utc::now() + Duration::seconds(expires_in),
        }
    }

    /// A token set holding only the long-lived refresh credential; the first
    /// use triggers a refresh.
    pub fn from_refresh_token(refresh_token: String) -> Self {
        Self {
            refresh_token,
            access_token: None,
            expires_at: Utc::now(),
        }
    }

    /// The access token, if present and still valid. No I/O, no side
    /// effects; validity applies the refresh buffer so a credential is
    /// treated as expired before the server invalidates it.
    pub fn cached_access_token(&self) -> Option<&str> {
        if self.is_expired() {
            return None;
        }
        self.access_token.as_deref()
    }

    /// Whether the access token is expired or inside the refresh buffer.
    pub fn is_expired(&self) -> bool {
        self.is_expired_with_buffer(EXPIRY_BUFFER_SECS)
    }

    /// Expiry check with a custom buffer in seconds.
    pub fn is_expired_with_buffer(&self, buffer_seconds: i64) -> bool {
        Utc::now() >= self.expires_at - Duration::seconds(buffer_seconds)
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("refresh_token", &"[REDACTED]")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Server-issued session for one device-code sign-in attempt.
///
/// Lives only for the duration of the attempt: the device code correlates
/// every poll, the user code and verification URI go to the human.
#[derive(Clone, Deserialize)]
pub struct DeviceAuthorization {
    /// Opaque code correlating the token polls
    pub device_code: String,
    /// Short code the user enters at the verification URI
    pub user_code: String,
    /// URL the user visits to approve the sign-in
    pub verification_uri: String,
    /// Server-requested seconds between token polls
    #[serde(default = "default_poll_interval")]
    pub interval: f64,
    /// Seconds until the device code itself expires
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_poll_interval() -> f64 {
    5.0
}

impl DeviceAuthorization {
    /// The polling interval as a duration.
    pub fn poll_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(self.interval)
    }
}

impl fmt::Debug for DeviceAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceAuthorization")
            .field("device_code", &"[REDACTED]")
            .field("user_code", &self.user_code)
            .field("verification_uri", &self.verification_uri)
            .field("interval", &self.interval)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
