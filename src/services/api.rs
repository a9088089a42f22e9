//! HTTP client for the launch statistics backend

use crate::model::{MetricsPayload, StatsPayload};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const METRICS_PATH: &str = "/api/launches/metrix";
pub const STATS_PATH: &str = "/api/launches/stats";

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("unexpected payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fetch worker exited without a response")]
    Interrupted,
}

/// The two read-only endpoints the dashboard consumes
pub trait LaunchApi: Send + Sync {
    fn fetch_metrics(&self) -> Result<MetricsPayload, ApiError>;
    fn fetch_stats(&self) -> Result<StatsPayload, ApiError>;
}

/// Error body the backend sends with non-2xx responses
#[derive(Deserialize)]
struct BackendError {
    error: String,
}

fn backend_error_message(body: &str) -> String {
    match serde_json::from_str::<BackendError>(body) {
        Ok(e) => e.error,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

/// Blocking client; each call is made from a fetch worker thread
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// `timeout: None` waits indefinitely
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                message: backend_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

impl LaunchApi for ApiClient {
    fn fetch_metrics(&self) -> Result<MetricsPayload, ApiError> {
        self.get_json(METRICS_PATH)
    }

    fn fetch_stats(&self) -> Result<StatsPayload, ApiError> {
        self.get_json(STATS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stats::fixtures::STATS_JSON;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response and return the base URL plus the request line
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let n = stream.read(&mut buf).unwrap();
            let request = String::from_utf8_lossy(&buf[..n]).to_string();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_fetch_stats_hits_stats_endpoint() {
        let (base, server) = serve_once("200 OK", STATS_JSON);
        let client = ApiClient::new(&base, Some(Duration::from_secs(5))).unwrap();

        let stats = client.fetch_stats().unwrap();
        assert_eq!(stats.yearly_stats.len(), 2);
        assert_eq!(server.join().unwrap(), "GET /api/launches/stats HTTP/1.1");
    }

    #[test]
    fn test_non_success_status_carries_backend_message() {
        let (base, server) = serve_once("404 Not Found", r#"{"error": "File launch_data.json not found"}"#);
        let client = ApiClient::new(&base, Some(Duration::from_secs(5))).unwrap();

        match client.fetch_metrics() {
            Err(ApiError::Status { status, message, .. }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "File launch_data.json not found");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert_eq!(server.join().unwrap(), "GET /api/launches/metrix HTTP/1.1");
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let (base, server) = serve_once("200 OK", r#"{"totalLaunches": "lots"}"#);
        let client = ApiClient::new(&base, Some(Duration::from_secs(5))).unwrap();

        assert!(matches!(client.fetch_metrics(), Err(ApiError::Decode { .. })));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        // Bind then drop to get a port with nothing listening
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let client =
            ApiClient::new(&format!("http://127.0.0.1:{}", port), Some(Duration::from_secs(5))).unwrap();

        assert!(matches!(client.fetch_stats(), Err(ApiError::Transport { .. })));
    }

    #[test]
    fn test_request_timeout_is_transport_error() {
        // Accept and hold the connection without ever responding
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            thread::sleep(Duration::from_secs(3));
            drop(stream);
        });

        let client = ApiClient::new(&base, Some(Duration::from_secs(1))).unwrap();
        let started = std::time::Instant::now();
        let result = client.fetch_metrics();

        assert!(matches!(result, Err(ApiError::Transport { .. })));
        assert!(started.elapsed() < Duration::from_secs(3));
        server.join().unwrap();
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_backend_error_message_fallbacks() {
        assert_eq!(backend_error_message(""), "empty response body");
        assert_eq!(backend_error_message("<html>oops</html>"), "<html>oops</html>");
    }
}
