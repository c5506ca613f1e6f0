//! # HTTP Client
//!
//! Thin JSON-over-HTTP wrapper around `reqwest`.
//!
//! ## Response Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  send() ──► status 2xx? ──yes──► body as T ──ok──► Ok(T)                │
//! │                 │                    │                                  │
//! │                 no                   └──fail──► ApiError::Decode        │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  body = {"error": "..."}? ──yes──► ApiError::Server { status, error }   │
//! │                 │                                                       │
//! │                 no ──────────────► ApiError::Server { status, reason }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries and no cancellation; the only bound is the configured timeout.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn, Instrument};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Error body the shop API sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// JSON HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Builds a client for `base_url` using the timeout from `config`.
    pub fn new(base_url: &str, config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `path` and decodes the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        let request = self.client.get(&url);
        Self::send("GET", url, request).await
    }

    /// POSTs `body` as JSON to `path` and decodes the JSON response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        Self::send("POST", url, request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Tags the request with a fresh id and runs it inside a span carrying
    /// that id, so every log line of the exchange can be correlated.
    async fn send<T: DeserializeOwned>(
        method: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4();
        let span = debug_span!("http_request", method, %url, %request_id);

        async move {
            debug!("Sending request");
            let response = request
                .header(REQUEST_ID_HEADER, request_id.to_string())
                .send()
                .await?;
            Self::handle_response(response).await
        }
        .instrument(span)
        .await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            };
            warn!(status = status.as_u16(), %message, "Request rejected");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let config = ApiConfig::default();
        let client = HttpClient::new("http://localhost:3000/api/weblarek/", &config).unwrap();

        assert_eq!(client.base_url(), "http://localhost:3000/api/weblarek");
        assert_eq!(
            client.url("/product"),
            "http://localhost:3000/api/weblarek/product"
        );
        assert_eq!(
            client.url("product/abc"),
            "http://localhost:3000/api/weblarek/product/abc"
        );
    }
}
