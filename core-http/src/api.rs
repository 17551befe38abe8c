//! Typed request execution and API error decoding.

use bridge_traits::http::{HttpClient, HttpRequest};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Structured error payload from a non-2xx response.
///
/// Keeps the raw bytes alongside two decoded views: the full parsed object
/// and the `error` code field the OAuth endpoints use for discrimination
/// (e.g. `authorization_pending`). If the payload is not a JSON object, both
/// views are absent and the raw bytes remain available for diagnostics.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: u16,
    raw: Bytes,
    fields: Option<Map<String, Value>>,
    code: Option<String>,
}

impl ApiError {
    pub fn from_response(status: u16, raw: Bytes) -> Self {
        let fields = match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        };
        let code = fields
            .as_ref()
            .and_then(|map| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            status,
            raw,
            fields,
            code,
        }
    }

    /// HTTP status the error arrived with.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The `error` code string, when the payload carried one.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Full parsed payload, when it was a JSON object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.fields.as_ref()
    }

    /// Raw payload bytes, always preserved.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "status {} ({})", self.status, code),
            None => write!(f, "status {}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

/// Runs one exchange and applies the shared classification: transport
/// failures become [`Error::Network`] before any status inspection; non-2xx
/// responses become [`Error::Api`].
async fn dispatch(http: &dyn HttpClient, request: HttpRequest) -> Result<(u16, Bytes)> {
    let url = request.url.clone();
    debug!(url = %url, method = ?request.method, "executing API request");

    let response = http.execute(request).await?;

    if !response.is_success() {
        warn!(url = %url, status = response.status, "API request rejected");
        return Err(Error::Api(ApiError::from_response(
            response.status,
            response.body,
        )));
    }

    Ok((response.status, response.body))
}

/// Executes a request whose 2xx response body decodes as JSON into `T`.
///
/// A decode failure is an [`Error::Decode`] retaining the raw bytes and the
/// cause, never a silent default.
pub async fn fetch_json<T: DeserializeOwned>(
    http: &dyn HttpClient,
    request: HttpRequest,
) -> Result<T> {
    let (status, body) = dispatch(http, request).await?;

    serde_json::from_slice(&body).map_err(|e| Error::Decode {
        status,
        body,
        reason: e.to_string(),
    })
}

/// Executes a request whose 2xx response must have a literally empty body.
///
/// A non-empty body is an [`Error::UnexpectedBody`], not a success.
pub async fn fetch_empty(http: &dyn HttpClient, request: HttpRequest) -> Result<()> {
    let (status, body) = dispatch(http, request).await?;

    if !body.is_empty() {
        return Err(Error::UnexpectedBody { status, body });
    }

    Ok(())
}

/// Executes a request and returns the 2xx response body verbatim.
pub async fn fetch_bytes(http: &dyn HttpClient, request: HttpRequest) -> Result<Bytes> {
    let (_, body) = dispatch(http, request).await?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::http::{HttpMethod, HttpResponse};
    use serde::Deserialize;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Replays a scripted sequence of responses and records the requests.
    struct ScriptedHttpClient {
        responses: Mutex<VecDeque<BridgeResult<HttpResponse>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedHttpClient {
        fn new(responses: Vec<BridgeResult<HttpResponse>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl HttpClient for ScriptedHttpClient {
        async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| {
                    Err(BridgeError::OperationFailed(
                        "no scripted response left".to_string(),
                    ))
                })
        }
    }

    fn response(status: u16, body: &str) -> BridgeResult<HttpResponse> {
        Ok(HttpResponse {
            status,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        })
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
    }

    #[tokio::test]
    async fn test_fetch_json_success() {
        let http = ScriptedHttpClient::new(vec![response(200, r#"{"name":"report.txt"}"#)]);
        let request = HttpRequest::new(HttpMethod::Get, "https://api.test/item");

        let payload: Payload = fetch_json(&http, request).await.unwrap();
        assert_eq!(payload.name, "report.txt");
        assert_eq!(http.request_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_json_decode_failure_keeps_bytes() {
        let http = ScriptedHttpClient::new(vec![response(200, "not json at all")]);
        let request = HttpRequest::new(HttpMethod::Get, "https://api.test/item");

        let err = fetch_json::<Payload>(&http, request).await.unwrap_err();
        match err {
            Error::Decode {
                status,
                body,
                reason,
            } => {
                assert_eq!(status, 200);
                assert_eq!(body, Bytes::from("not json at all"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let http = ScriptedHttpClient::new(vec![response(
            400,
            r#"{"error":"authorization_pending","error_description":"still waiting"}"#,
        )]);
        let request = HttpRequest::new(HttpMethod::Post, "https://login.test/token");

        let err = fetch_json::<Payload>(&http, request).await.unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status(), 400);
                assert_eq!(api.code(), Some("authorization_pending"));
                assert!(api.fields().unwrap().contains_key("error_description"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_keeps_raw_bytes() {
        let http = ScriptedHttpClient::new(vec![response(502, "<html>bad gateway</html>")]);
        let request = HttpRequest::new(HttpMethod::Get, "https://api.test/item");

        let err = fetch_bytes(&http, request).await.unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.status(), 502);
                assert_eq!(api.code(), None);
                assert!(api.fields().is_none());
                assert_eq!(api.raw(), &Bytes::from("<html>bad gateway</html>"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_empty_accepts_empty_body() {
        let http = ScriptedHttpClient::new(vec![response(204, "")]);
        let request = HttpRequest::new(HttpMethod::Delete, "https://api.test/item");

        fetch_empty(&http, request).await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_empty_rejects_unexpected_body() {
        let http = ScriptedHttpClient::new(vec![response(200, r#"{"ok":true}"#)]);
        let request = HttpRequest::new(HttpMethod::Delete, "https://api.test/item");

        let err = fetch_empty(&http, request).await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedBody { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_network_failure_short_circuits() {
        let http = ScriptedHttpClient::new(vec![Err(BridgeError::Connect(
            "dns lookup failed".to_string(),
        ))]);
        let request = HttpRequest::new(HttpMethod::Get, "https://api.test/item");

        let err = fetch_bytes(&http, request).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_api_error_non_string_error_field() {
        // Graph-style error objects nest the code; only string codes are
        // exposed through `code()`.
        let api = ApiError::from_response(
            403,
            Bytes::from(r#"{"error":{"code":"accessDenied","message":"denied"}}"#),
        );
        assert_eq!(api.code(), None);
        assert!(api.fields().is_some());
    }
}
