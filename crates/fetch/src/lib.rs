//! Conditional retrieval of the documentation list pages.
//!
//! A [`Fetcher`] asks an origin for a page, optionally presenting the
//! validation token (ETag) it received last time. The origin either
//! confirms nothing changed ([`FetchOutcome::Unchanged`]) or sends a new
//! [`Page`] with a new token.

pub mod error;
mod http;
#[cfg(feature = "mock")]
mod mock;

use async_trait::async_trait;
use jotunn_extract::Document;
use std::sync::Arc;
use url::Url;

use crate::error::Result;
pub use crate::http::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpFetcher};
#[cfg(feature = "mock")]
pub use crate::mock::MockFetcher;

pub type FetcherHandle = Arc<dyn Fetcher + Send + Sync>;

/// A freshly downloaded page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Final URL after redirects; the base for resolving relative links.
    pub url: Url,
    pub body: String,
    /// Validation token to present on the next request, if the origin sent one.
    pub token: Option<String>,
}
impl Page {
    /// Parses the body into a navigable document rooted at [`url`](Self::url).
    ///
    /// Parsing is kept separate from fetching: parsed trees are not `Send`,
    /// so they should only ever live between two await points.
    pub fn document(&self) -> Document {
        Document::from_html(&self.body, self.url.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The origin confirmed the previously seen token is still current.
    Unchanged,
    Fetched(Page),
}

/// Retrieves remote pages, honouring a previously seen validation token.
#[async_trait]
pub trait Fetcher {
    /// Fetches `url`, sending `token` as an `If-None-Match` precondition
    /// when present.
    ///
    /// Any non-success status other than "not modified" is an error.
    async fn fetch(&self, url: &Url, token: Option<&str>) -> Result<FetchOutcome>;
}
