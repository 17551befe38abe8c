//! # Authentication Module
//!
//! Device-code sign-in and token lifecycle for the Microsoft identity
//! platform.
//!
//! ## Overview
//!
//! - [`DeviceCodeFlow`] runs the OAuth 2.0 device authorization grant:
//!   obtain a user code, hand it to the host for display, poll the token
//!   endpoint until the user approves.
//! - [`TokenManager`] owns the resulting [`Tokens`] and hands out a usable
//!   bearer credential, refreshing it when stale. Concurrent callers
//!   coalesce onto a single refresh request.
//! - Token persistence is the caller's job: serialize the [`Tokens`]
//!   snapshot however the host stores secrets.

pub mod config;
pub mod device;
pub mod error;
pub mod token;
pub mod types;

pub use config::AuthConfig;
pub use device::DeviceCodeFlow;
pub use error::{AuthError, Result};
pub use token::TokenManager;
pub use types::{DeviceAuthorization, Tokens};
