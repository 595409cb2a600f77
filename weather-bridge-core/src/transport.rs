use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::FetchError;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Outbound HTTP capability. Anything that can perform a GET can drive a fetch.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    http: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::ClientSetup(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, FetchError> {
        let res = self.http.get(url.clone()).send().await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        debug!(status, bytes = body.len(), "weather provider responded");

        Ok(HttpResponse { status, body })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_timeout() {
        assert!(ReqwestClient::new(Duration::from_secs(1)).is_ok());
    }

    #[test]
    fn short_body_is_untouched() {
        assert_eq!(truncate_body("{\"cod\":401}"), "{\"cod\":401}");
    }

    #[test]
    fn long_body_is_cut() {
        let body = "x".repeat(500);
        let out = truncate_body(&body);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "°".repeat(150);
        let out = truncate_body(&body);
        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);
    }
}
