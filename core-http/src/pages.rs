//! Cursor-following pagination over the typed pipeline.

use bridge_traits::http::{HttpClient, HttpMethod, HttpRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::api;
use crate::error::Result;

/// One page of a listing: the entries plus an opaque continuation cursor
/// pointing at the next page, absent on the last one.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// Fetches every page of a listing, strictly sequentially.
///
/// Follow-up requests go to the exact cursor URL the previous page supplied
/// and carry the same bearer credential the first request used (the
/// credential is not re-resolved between pages). Entries accumulate in
/// response order. Any page failure aborts the whole listing with that
/// failure; no partial result is returned.
pub async fn fetch_all_pages<T: DeserializeOwned>(
    http: &dyn HttpClient,
    first_url: String,
    bearer: &str,
    timeout: Option<Duration>,
) -> Result<Vec<T>> {
    let mut entries = Vec::new();
    let mut next = Some(first_url);

    while let Some(url) = next {
        let mut request = HttpRequest::new(HttpMethod::Get, url).bearer_token(bearer);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let page: Page<T> = api::fetch_json(http, request).await?;
        debug!(
            entries = page.value.len(),
            has_more = page.next_link.is_some(),
            "fetched listing page"
        );

        entries.extend(page.value);
        next = page.next_link;
    }

    Ok(entries)
}
