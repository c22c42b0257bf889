//! Parsed HTML documents that remember where they came from.

use exn::ResultExt;
use scraper::{ElementRef, Html};
use url::Url;

use crate::consts;
use crate::error::{ErrorKind, Result};

/// A parsed HTML page together with the URL it was served from.
///
/// The base URL is what makes relative image sources (`../img/wood.png`)
/// resolvable into absolute links once the record has left the page.
#[derive(Debug)]
pub struct Document {
    html: Html,
    base: Url,
}

impl Document {
    pub fn new(html: Html, base: Url) -> Self {
        Self { html, base }
    }

    pub fn from_html(html: &str, base: Url) -> Self {
        Self::new(Html::parse_document(html), base)
    }

    /// Parse `html`, validating `base` as an absolute URL first.
    pub fn parse(html: &str, base: &str) -> Result<Self> {
        let base = Url::parse(base).or_raise(|| ErrorKind::InvalidBaseUrl(base.to_string()))?;
        Ok(Self::from_html(html, base))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolves a (possibly relative) link against the document's base URL.
    ///
    /// Blank or unresolvable links yield `None`.
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.base.join(href).ok().map(String::from)
    }

    /// The first `table` in the document, which is where every object list
    /// keeps its data.
    pub(crate) fn primary_table(&self) -> Option<ElementRef<'_>> {
        self.html.select(&consts::TABLE_SELECTOR).next()
    }
}
