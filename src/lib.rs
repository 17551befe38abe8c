//! Workspace facade crate.
//!
//! Re-exports the OneDrive client core crates so host applications can depend
//! on a single package instead of wiring each workspace member individually.

pub use bridge_desktop;
pub use bridge_traits;
pub use core_async;
pub use core_auth;
pub use core_http;
pub use core_runtime;
pub use provider_onedrive;
