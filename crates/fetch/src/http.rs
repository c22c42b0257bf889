//! reqwest-backed fetcher.

use std::time::Duration;

use async_trait::async_trait;
use exn::ResultExt;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use reqwest::{Client, StatusCode};
use tracing::instrument;
use url::Url;

use crate::error::{Error, ErrorKind, Result};
use crate::{FetchOutcome, Fetcher, Page};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
pub const DEFAULT_USER_AGENT: &str =
    concat!("jotunn/", env!("CARGO_PKG_VERSION"), " (Jotunn documentation search cache)");

/// Fetches pages over HTTP(S) with a fixed per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// A fetcher with the default timeout and client identifier.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self, url, token), fields(url = %url, conditional = token.is_some()))]
    async fn fetch(&self, url: &Url, token: Option<&str>) -> Result<FetchOutcome> {
        if !matches!(url.scheme(), "http" | "https") {
            exn::bail!(ErrorKind::InvalidUrl(url.to_string()));
        }
        let mut request = self.client.get(url.clone());
        if let Some(token) = token {
            request = request.header(IF_NONE_MATCH, token);
        }
        let response = request.send().await.map_err(raise)?;
        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            tracing::debug!("Origin reports page unchanged");
            return Ok(FetchOutcome::Unchanged);
        }
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let token = response.headers().get(ETAG).and_then(|value| value.to_str().ok()).map(str::to_string);
        let url = response.url().clone();
        let body = response.text().await.or_raise(|| ErrorKind::Body)?;
        tracing::debug!(bytes = body.len(), etag = token.as_deref(), "Fetched page");
        Ok(FetchOutcome::Fetched(Page { url, body, token }))
    }
}

/// Classifies a transport error, keeping the reqwest error as the cause.
fn raise(err: reqwest::Error) -> Error {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else if let Some(status) = err.status() {
        ErrorKind::Status(status.as_u16())
    } else {
        ErrorKind::Network(err.to_string())
    };
    exn::Exn::from(err).raise(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const HTML: &str = "<table><tbody><tr><td>Wood</td></tr></tbody></table>";

    fn url(server: &MockServer, p: &str) -> Url {
        Url::parse(&format!("{}{p}", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_etag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items.html"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"v1\"").set_body_string(HTML))
            .expect(1)
            .mount(&server)
            .await;
        let fetcher = HttpFetcher::new().unwrap();
        let outcome = fetcher.fetch(&url(&server, "/items.html"), None).await.unwrap();
        let FetchOutcome::Fetched(page) = outcome else {
            panic!("expected a fetched page, got {outcome:?}");
        };
        assert_eq!(page.body, HTML);
        assert_eq!(page.token.as_deref(), Some("\"v1\""));
        assert_eq!(page.url, url(&server, "/items.html"));
        assert!(page.document().html().html().contains("Wood"));
    }

    #[tokio::test]
    async fn test_fetch_without_etag() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(HTML))
            .mount(&server)
            .await;
        let fetcher = HttpFetcher::new().unwrap();
        let outcome = fetcher.fetch(&url(&server, "/pieces.html"), Some("\"stale\"")).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Fetched(Page { token: None, .. })));
    }

    #[tokio::test]
    async fn test_not_modified_is_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("if-none-match", "\"v1\""))
            .respond_with(ResponseTemplate::new(304))
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"v2\"").set_body_string(HTML))
            .with_priority(2)
            .mount(&server)
            .await;
        let fetcher = HttpFetcher::new().unwrap();
        let outcome = fetcher.fetch(&url(&server, "/recipes.html"), Some("\"v1\"")).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Unchanged);
        let outcome = fetcher.fetch(&url(&server, "/recipes.html"), Some("\"v0\"")).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Fetched(Page { token: Some(ref t), .. }) if t == "\"v2\""));
    }

    #[rstest]
    #[case(404)]
    #[case(500)]
    #[case(503)]
    #[tokio::test]
    async fn test_error_status_is_an_error(#[case] status: u16) {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(status)).mount(&server).await;
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&url(&server, "/characters.html"), None).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Status(status));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;
        let fetcher = HttpFetcher::with_options(Duration::from_millis(50), DEFAULT_USER_AGENT).unwrap();
        let err = fetcher.fetch(&url(&server, "/prefabs.html"), None).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Timeout);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_rejects_non_http_urls() {
        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch(&Url::parse("file:///etc/passwd").unwrap(), None).await.unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidUrl("file:///etc/passwd".to_string()));
    }
}
