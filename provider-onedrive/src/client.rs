//! Drive operations against Microsoft Graph.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use bytes::Bytes;
use core_auth::TokenManager;
use core_http::{fetch_all_pages, fetch_bytes, fetch_empty, fetch_json, RequestBody};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{DriveError, Result};
use crate::items::{DriveItem, FolderFacet, ItemUpdate, NewFolder, ParentReference};

const GRAPH_BASE: &str = "https://graph.microsoft.com/v1.0";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Typed client for the signed-in user's drive.
///
/// Thin consumer of the core contracts: every operation resolves a bearer
/// credential through the shared [`TokenManager`], builds one request, and
/// interprets the response through the `core-http` pipeline. The per-request
/// timeout bounds each HTTP call, not a whole multi-page listing.
pub struct OneDriveClient {
    http: Arc<dyn HttpClient>,
    auth: Arc<TokenManager>,
    base_url: String,
    timeout: Duration,
}

impl OneDriveClient {
    pub fn new(http: Arc<dyn HttpClient>, auth: Arc<TokenManager>) -> Self {
        Self {
            http,
            auth,
            base_url: GRAPH_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Points the client at a different Graph deployment (national clouds,
    /// test stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Metadata for the entry at a root-relative path (`""` is the root
    /// folder itself).
    #[instrument(skip(self))]
    pub async fn get_item(&self, path: &str) -> Result<DriveItem> {
        let request = self
            .request(HttpMethod::Get, self.path_url(path, None)?)
            .await?;

        fetch_json(self.http.as_ref(), request)
            .await
            .map_err(|e| DriveError::item_access(display_path(path), e))
    }

    /// All children of the folder at a root-relative path, across every
    /// listing page, in response order.
    #[instrument(skip(self))]
    pub async fn list_children(&self, path: &str) -> Result<Vec<DriveItem>> {
        let token = self.auth.access_token().await?;
        let url = self.path_url(path, Some("children"))?;

        debug!(path = display_path(path), "listing folder children");

        // One resolved credential serves every page of this listing
        fetch_all_pages(self.http.as_ref(), url.into(), &token, Some(self.timeout))
            .await
            .map_err(|e| DriveError::item_access(display_path(path), e))
    }

    /// All children of an already-fetched folder item, by id.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn list_children_of(&self, item: &DriveItem) -> Result<Vec<DriveItem>> {
        if !item.is_folder() {
            return Err(DriveError::NotAFolder(item.name.clone()));
        }

        let token = self.auth.access_token().await?;
        let url = self.item_url(&item.id, Some("children"))?;

        fetch_all_pages(self.http.as_ref(), url.into(), &token, Some(self.timeout))
            .await
            .map_err(|e| DriveError::item_access(&item.name, e))
    }

    /// Creates a folder under the folder at `parent_path`, failing on a name
    /// collision.
    #[instrument(skip(self))]
    pub async fn create_folder(&self, parent_path: &str, name: &str) -> Result<DriveItem> {
        let token = self.auth.access_token().await?;
        let url = self.path_url(parent_path, Some("children"))?;

        let body = RequestBody::json(&NewFolder {
            name,
            folder: FolderFacet::default(),
            conflict_behavior: "fail",
        })?;
        let request = body.apply(
            HttpRequest::new(HttpMethod::Post, url)
                .bearer_token(&token)
                .timeout(self.timeout),
        )?;

        Ok(fetch_json(self.http.as_ref(), request).await?)
    }

    /// Moves an item under a new parent folder, optionally renaming it.
    #[instrument(skip(self))]
    pub async fn move_item(
        &self,
        item_id: &str,
        new_parent_id: &str,
        new_name: Option<&str>,
    ) -> Result<DriveItem> {
        let token = self.auth.access_token().await?;
        let url = self.item_url(item_id, None)?;

        let body = RequestBody::json(&ItemUpdate {
            name: new_name,
            parent_reference: Some(ParentReference {
                id: Some(new_parent_id.to_string()),
                drive_id: None,
                path: None,
            }),
        })?;
        let request = body.apply(
            HttpRequest::new(HttpMethod::Patch, url)
                .bearer_token(&token)
                .timeout(self.timeout),
        )?;

        fetch_json(self.http.as_ref(), request)
            .await
            .map_err(|e| DriveError::item_access(item_id, e))
    }

    /// Deletes an item. The service answers 204 with an empty body; anything
    /// else in the body is surfaced, not ignored.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: &str) -> Result<()> {
        let request = self
            .request(HttpMethod::Delete, self.item_url(item_id, None)?)
            .await?;

        fetch_empty(self.http.as_ref(), request)
            .await
            .map_err(|e| DriveError::item_access(item_id, e))
    }

    /// Uploads file content to a root-relative path (simple upload, suitable
    /// up to ~4 MiB; larger files need an upload session).
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn upload(&self, path: &str, content: Bytes) -> Result<DriveItem> {
        let token = self.auth.access_token().await?;
        let url = self.path_url(path, Some("content"))?;

        let request = RequestBody::Raw(content).apply(
            HttpRequest::new(HttpMethod::Put, url)
                .bearer_token(&token)
                .timeout(self.timeout),
        )?;

        Ok(fetch_json(self.http.as_ref(), request).await?)
    }

    /// Downloads a file item's content.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn download(&self, item: &DriveItem) -> Result<Bytes> {
        if !item.is_file() {
            return Err(DriveError::NotAFile(item.name.clone()));
        }

        let request = self
            .request(HttpMethod::Get, self.item_url(&item.id, Some("content"))?)
            .await?;

        fetch_bytes(self.http.as_ref(), request)
            .await
            .map_err(|e| DriveError::item_access(&item.name, e))
    }

    async fn request(&self, method: HttpMethod, url: Url) -> Result<HttpRequest> {
        let token = self.auth.access_token().await?;
        Ok(HttpRequest::new(method, url)
            .bearer_token(token)
            .timeout(self.timeout))
    }

    /// Builds `/me/drive/root` URLs using Graph's colon syntax for
    /// root-relative paths, percent-escaping each path component.
    fn path_url(&self, path: &str, action: Option<&str>) -> Result<Url> {
        let mut url = self.base()?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| core_http::Error::Encode("base URL cannot be a base".to_string()))?;
            segments.pop_if_empty().extend(["me", "drive"]);

            let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
            if components.is_empty() {
                segments.push("root");
            } else {
                segments.push("root:");
                let last = components.len() - 1;
                for (i, component) in components.iter().enumerate() {
                    if i == last && action.is_some() {
                        // Close the colon syntax so the action can follow
                        segments.push(&format!("{component}:"));
                    } else {
                        segments.push(component);
                    }
                }
            }

            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    /// Builds `/me/drive/items/{id}` URLs.
    fn item_url(&self, item_id: &str, action: Option<&str>) -> Result<Url> {
        let mut url = self.base()?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| core_http::Error::Encode("base URL cannot be a base".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["me", "drive", "items", item_id]);
            if let Some(action) = action {
                segments.push(action);
            }
        }
        Ok(url)
    }

    fn base(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .map_err(|e| core_http::Error::Encode(format!("invalid base URL: {e}")).into())
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
