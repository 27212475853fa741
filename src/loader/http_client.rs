//! HTTP client creation and the fetch capability the loader runs on

use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::error::{AppError, FetchFailure};

/// A fully read HTTP response. Non-2xx statuses are returned as responses,
/// not failures; deciding what a status means is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests against the printer host.
///
/// `url_for` lets errors name the full URL even when the request never left
/// the machine.
pub trait Fetch {
    fn url_for(&self, path: &str) -> String;

    fn get(&self, path: &str) -> impl Future<Output = Result<FetchResponse, FetchFailure>> + Send;
}

/// Creates a properly configured HTTP client with connection pooling and timeout handling.
///
/// # Arguments
/// * `timeout_seconds` - Whole-request timeout, connect through body
///
/// # Returns
/// * `Result<Client, reqwest::Error>` - A configured reqwest HTTP client or error
pub fn create_http_client_with_timeout(timeout_seconds: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .pool_max_idle_per_host(crate::constants::HTTP_POOL_MAX_IDLE_PER_HOST)
        .build()
}

/// [`Fetch`] over a pooled reqwest client bound to one printer base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn classify_request_error(e: &reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_connect() {
        FetchFailure::Connection(e.to_string())
    } else {
        FetchFailure::Request(e.to_string())
    }
}

impl Fetch for HttpFetcher {
    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn get(&self, path: &str) -> Result<FetchResponse, FetchFailure> {
        let url = self.url_for(path);
        info!("Fetching {url}");

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Request failed for URL {}: {}", url, e);
            classify_request_error(&e)
        })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        debug!("Response status: {status}, content type: {content_type:?}");

        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read response body from URL {}: {}", url, e);
            if e.is_timeout() {
                FetchFailure::Timeout
            } else {
                FetchFailure::Body(e.to_string())
            }
        })?;
        debug!("Response length: {} bytes", body.len());

        Ok(FetchResponse {
            url,
            status,
            content_type,
            body,
        })
    }
}

/// Creates an HTTP client for testing with default timeout
#[cfg(test)]
pub fn create_test_http_client() -> Client {
    create_http_client_with_timeout(crate::constants::DEFAULT_HTTP_TIMEOUT_SECONDS)
        .expect("Failed to create test HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[test]
    fn test_url_for_joins_base_and_path() {
        let fetcher = HttpFetcher::with_client(create_test_http_client(), "http://octopi.local/");
        assert_eq!(fetcher.base_url(), "http://octopi.local");
        assert_eq!(
            fetcher.url_for("/api/webcam.jpg"),
            "http://octopi.local/api/webcam.jpg"
        );
    }

    #[test]
    fn test_fetch_response_is_success() {
        let mut response = FetchResponse {
            url: "http://localhost/api/printer/status".to_string(),
            status: 204,
            content_type: None,
            body: Bytes::new(),
        };
        assert!(response.is_success());
        response.status = 304;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_get_returns_body_and_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/webcam.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xD9]),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_client(create_test_http_client(), &mock_server.uri());
        let response = fetcher.get("/api/webcam.jpg").await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(response.body.to_vec(), vec![0xFFu8, 0xD8, 0xFF, 0xD9]);
        assert_eq!(response.url, format!("{}/api/webcam.jpg", mock_server.uri()));
    }

    #[tokio::test]
    async fn test_get_passes_error_statuses_through() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/printer/status"))
            .respond_with(ResponseTemplate::new(503).set_body_string("warming up"))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_client(create_test_http_client(), &mock_server.uri());
        let response = fetcher.get("/api/printer/status").await.unwrap();

        assert_eq!(response.status, 503);
        assert!(!response.is_success());
        assert_eq!(&response.body[..], b"warming up");
    }

    #[tokio::test]
    async fn test_get_reports_connection_failure() {
        // Nothing listens on the discard port
        let fetcher = HttpFetcher::new("http://127.0.0.1:9", 5).unwrap();
        let result = fetcher.get("/api/printer/status").await;

        assert!(matches!(result, Err(FetchFailure::Connection(_))));
    }
}
