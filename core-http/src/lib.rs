//! # API Execution Core
//!
//! The typed request/response pipeline every drive operation runs through:
//!
//! 1. Encode a typed payload into a `(content-type, bytes)` pair
//!    ([`body::RequestBody`]: empty, raw, form, or JSON, selected explicitly
//!    per call site).
//! 2. Execute one HTTP exchange through the host's
//!    [`HttpClient`](bridge_traits::http::HttpClient).
//! 3. Classify the response: transport failures short-circuit as
//!    [`Error::Network`]; non-2xx bodies are parsed into an [`ApiError`];
//!    2xx bodies are decoded according to what the call expects
//!    ([`fetch_json`], [`fetch_empty`], [`fetch_bytes`]).
//!
//! [`pages::fetch_all_pages`] layers cursor-following pagination over the
//! same pipeline.

pub mod api;
pub mod body;
pub mod error;
pub mod pages;

pub use api::{fetch_bytes, fetch_empty, fetch_json, ApiError};
pub use body::RequestBody;
pub use error::{Error, Result};
pub use pages::{fetch_all_pages, Page};
