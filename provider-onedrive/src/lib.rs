//! # OneDrive Provider
//!
//! Typed file and folder operations against Microsoft Graph, built on the
//! core auth and pipeline contracts.
//!
//! ## Overview
//!
//! This crate provides:
//! - Drive item metadata and listing with cursor-based pagination
//! - Folder creation, item move/rename, item deletion
//! - Simple uploads and downloads of file content
//!
//! Every operation resolves its bearer credential through
//! [`TokenManager`](core_auth::TokenManager) and runs through the
//! `core-http` pipeline; API errors are remapped into the
//! filesystem-flavored [`DriveError`] at this boundary.

pub mod client;
pub mod error;
pub mod items;

pub use client::OneDriveClient;
pub use error::{DriveError, Result};
pub use items::{DriveItem, FileFacet, FolderFacet, ParentReference};
