//! # Desktop Bridge
//!
//! Native implementations of the bridge traits for desktop hosts.
//!
//! Currently ships the reqwest-backed [`ReqwestHttpClient`] transport.

pub mod http;

pub use http::ReqwestHttpClient;
