//! Request payload encodings.

use bridge_traits::http::HttpRequest;
use bytes::Bytes;
use serde::Serialize;

use crate::error::{Error, Result};

/// The payload shapes the drive and identity endpoints accept, selected
/// explicitly by each call site.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Zero-length body, no content type.
    Empty,
    /// Pass-through octet stream (file content uploads).
    Raw(Bytes),
    /// `application/x-www-form-urlencoded` key/value pairs (OAuth grants).
    Form(Vec<(String, String)>),
    /// `application/json` document (Graph request shapes).
    Json(serde_json::Value),
}

impl RequestBody {
    /// Builds a form payload from key/value pairs.
    pub fn form<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a JSON payload from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| Error::Encode(e.to_string()))
    }

    /// The content type the encoded payload should be sent with.
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::Empty => None,
            Self::Raw(_) => Some("application/octet-stream"),
            Self::Form(_) => Some("application/x-www-form-urlencoded"),
            Self::Json(_) => Some("application/json"),
        }
    }

    /// Encodes the payload to its wire bytes.
    pub fn encode(&self) -> Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Raw(bytes) => Ok(bytes.clone()),
            Self::Form(pairs) => serde_urlencoded::to_string(pairs)
                .map(Bytes::from)
                .map_err(|e| Error::Encode(e.to_string())),
            Self::Json(value) => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| Error::Encode(e.to_string())),
        }
    }

    /// Attaches the encoded payload and its content type to a request.
    pub fn apply(&self, request: HttpRequest) -> Result<HttpRequest> {
        let request = match self.content_type() {
            Some(content_type) => request.header("Content-Type", content_type),
            None => request,
        };

        match self {
            Self::Empty => Ok(request),
            _ => Ok(request.body(self.encode()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::http::HttpMethod;

    #[test]
    fn test_empty_has_no_body_or_content_type() {
        let body = RequestBody::Empty;
        assert_eq!(body.content_type(), None);
        assert_eq!(body.encode().unwrap(), Bytes::new());

        let request = body
            .apply(HttpRequest::new(HttpMethod::Get, "https://api.test"))
            .unwrap();
        assert!(request.body.is_none());
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_raw_passes_bytes_through() {
        let content = Bytes::from_static(b"\x00\x01binary");
        let body = RequestBody::Raw(content.clone());

        assert_eq!(body.content_type(), Some("application/octet-stream"));
        assert_eq!(body.encode().unwrap(), content);
    }

    #[test]
    fn test_form_encoding_round_trip() {
        let body = RequestBody::form([
            ("grant_type", "urn:ietf:params:oauth:grant-type:device_code"),
            ("scope", "Files.ReadWrite.All offline_access"),
            ("note", "a=b&c"),
        ]);

        let encoded = body.encode().unwrap();
        let text = std::str::from_utf8(&encoded).unwrap();

        // Reserved characters are escaped on the wire
        assert!(text.contains("urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Adevice_code"));
        assert!(!text.contains(' '));

        // Decoding on the receiving side reconstructs the original pairs
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(text).unwrap();
        assert_eq!(
            decoded,
            vec![
                (
                    "grant_type".to_string(),
                    "urn:ietf:params:oauth:grant-type:device_code".to_string()
                ),
                (
                    "scope".to_string(),
                    "Files.ReadWrite.All offline_access".to_string()
                ),
                ("note".to_string(), "a=b&c".to_string()),
            ]
        );
    }

    #[test]
    fn test_json_encoding() {
        #[derive(serde::Serialize)]
        struct NewItem<'a> {
            name: &'a str,
        }

        let body = RequestBody::json(&NewItem { name: "Reports" }).unwrap();
        assert_eq!(body.content_type(), Some("application/json"));

        let encoded = body.encode().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(value["name"], "Reports");
    }

    #[test]
    fn test_apply_sets_header_and_body() {
        let body = RequestBody::form([("client_id", "abc-123")]);
        let request = body
            .apply(HttpRequest::new(HttpMethod::Post, "https://login.test"))
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(request.body.unwrap(), Bytes::from("client_id=abc-123"));
    }
}
