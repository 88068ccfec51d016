//! Shortened map-link resolution over HTTP.
//!
//! Shortened links answer with a redirect whose `Location` header carries
//! the full map URL. [`HttpRedirectResolver`] sends one `HEAD` request
//! with redirects disabled and reads the header, so exactly one hop is ever
//! followed.

use std::time::Duration;

use reqwest::{StatusCode, header::LOCATION, redirect};
use thiserror::Error;
use url::Url;

use umkm_core::maps::RedirectResolver;

/// Errors from following a shortened link.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request failed or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response was not a redirect.
    #[error("expected a redirect, got {0}")]
    NotRedirect(StatusCode),

    /// The redirect had no usable `Location` header.
    #[error("invalid redirect location: {0}")]
    InvalidLocation(String),
}

/// Resolves shortened map links with a single non-following request.
#[derive(Debug, Clone)]
pub struct HttpRedirectResolver {
    client: reqwest::Client,
}

impl HttpRedirectResolver {
    /// Create a resolver whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    async fn follow_once(&self, url: &str) -> Result<String, ResolveError> {
        let response = self.client.head(url).send().await?;
        let status = response.status();
        if !status.is_redirection() {
            return Err(ResolveError::NotRedirect(status));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ResolveError::InvalidLocation("missing".to_string()))?;

        join_location(url, location)
    }
}

/// Resolve a `Location` value against the URL that produced it.
fn join_location(base: &str, location: &str) -> Result<String, ResolveError> {
    let base = Url::parse(base).map_err(|e| ResolveError::InvalidLocation(e.to_string()))?;
    base.join(location)
        .map(String::from)
        .map_err(|e| ResolveError::InvalidLocation(e.to_string()))
}

impl RedirectResolver for HttpRedirectResolver {
    type Error = ResolveError;

    async fn resolve(&self, url: &str) -> Result<String, Self::Error> {
        let result = self.follow_once(url).await;
        if let Err(e) = &result {
            tracing::warn!(url = %url, error = %e, "Failed to resolve shortened map link");
        }
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_join_absolute_location() {
        let joined = join_location(
            "https://maps.app.goo.gl/abc123",
            "https://www.google.com/maps/place/@-4.0098,119.6231,17z",
        )
        .unwrap();
        assert_eq!(joined, "https://www.google.com/maps/place/@-4.0098,119.6231,17z");
    }

    #[test]
    fn test_join_relative_location() {
        let joined = join_location("https://maps.app.goo.gl/abc123", "/maps?q=-4.0098,119.6231")
            .unwrap();
        assert_eq!(joined, "https://maps.app.goo.gl/maps?q=-4.0098,119.6231");
    }

    #[test]
    fn test_join_rejects_unparseable_base() {
        assert!(matches!(
            join_location("not a url", "/x"),
            Err(ResolveError::InvalidLocation(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_error() {
        let resolver = HttpRedirectResolver::new(Duration::from_millis(200)).unwrap();
        let result = resolver.resolve("http://127.0.0.1:9/maps").await;
        assert!(result.is_err());
    }
}
