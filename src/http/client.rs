//! HTTP client implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::{Duration, Instant};

use super::{Fetch, Response};
use crate::config::ScannerConfig;
use crate::error::FetchError;

/// HTTP client wrapper around reqwest
///
/// Each target worker holds its own instance so cookies never leak
/// across concurrent targets.
pub struct HttpClient {
    /// Inner reqwest client
    client: reqwest::Client,

    /// Request timeout in seconds
    timeout_secs: u64,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: &ScannerConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()
            .map_err(|e| FetchError::RequestFailed(format!("failed to build client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs: config.request_timeout,
        })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        cookies: &HashMap<String, String>,
    ) -> Result<Response, FetchError> {
        url::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        let start = Instant::now();

        let mut header_map = HeaderMap::new();
        for (key, value) in headers {
            if let (Ok(name), Ok(val)) = (HeaderName::from_str(key), HeaderValue::from_str(value)) {
                header_map.insert(name, val);
            }
        }

        if !cookies.is_empty() {
            let cookie_header = cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            if let Ok(val) = HeaderValue::from_str(&cookie_header) {
                header_map.insert(reqwest::header::COOKIE, val);
            }
        }

        let response = self
            .client
            .get(url)
            .headers(header_map)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.timeout_secs)
                } else {
                    FetchError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_string();

        let mut response_headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                response_headers.insert(key.as_str().to_string(), v.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("failed to read body: {}", e)))?;

        Ok(Response {
            status,
            status_text,
            headers: response_headers,
            body: body.to_vec(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}
