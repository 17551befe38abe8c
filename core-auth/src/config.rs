//! Client identity and endpoint configuration for the Microsoft identity
//! platform.

/// Scope requested by default: full drive read/write plus a refresh token.
pub const DEFAULT_SCOPE: &str = "Files.ReadWrite.All offline_access";

const DEVICE_CODE_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/devicecode";
const TOKEN_URL: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";

/// OAuth configuration for one registered application.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Application (client) id from the app registration
    pub client_id: String,
    /// Space-separated scope string
    pub scope: String,
    /// Device authorization endpoint
    pub device_code_url: String,
    /// Token endpoint
    pub token_url: String,
}

impl AuthConfig {
    /// Configuration against the common Microsoft endpoints with the
    /// default drive scope.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            scope: DEFAULT_SCOPE.to_string(),
            device_code_url: DEVICE_CODE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_device_code_url(mut self, url: impl Into<String>) -> Self {
        self.device_code_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("client-123");
        assert_eq!(config.client_id, "client-123");
        assert_eq!(config.scope, "Files.ReadWrite.All offline_access");
        assert_eq!(
            config.device_code_url,
            "https://login.microsoftonline.com/common/oauth2/v2.0/devicecode"
        );
        assert_eq!(
            config.token_url,
            "https://login.microsoftonline.com/common/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::new("client-123")
            .with_scope("Files.Read")
            .with_token_url("https://login.example/token");
        assert_eq!(config.scope, "Files.Read");
        assert_eq!(config.token_url, "https://login.example/token");
    }
}
