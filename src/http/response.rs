//! HTTP response types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// HTTP response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Status text (e.g., "OK", "Not Found")
    pub status_text: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,

    /// Response time in milliseconds
    pub duration_ms: u64,
}

impl Response {
    /// Successful 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8 (lossy)
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Content-Type says HTML
    pub fn is_html(&self) -> bool {
        self.headers
            .iter()
            .any(|(k, v)| k.eq_ignore_ascii_case("content-type") && v.contains("text/html"))
    }

    #[cfg(test)]
    pub fn ok_html(body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/html".to_string());
        Self {
            status: 200,
            status_text: "OK".to_string(),
            headers,
            body: body.as_bytes().to_vec(),
            duration_ms: 0,
        }
    }

    #[cfg(test)]
    pub fn ok_script(body: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/javascript".to_string());
        Self {
            status: 200,
            status_text: "OK".to_string(),
            headers,
            body: body.as_bytes().to_vec(),
            duration_ms: 0,
        }
    }
}
