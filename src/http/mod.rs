//! HTTP fetch module
//!
//! Single-GET page fetching with per-target headers and cookies. The
//! `Fetch` trait is the seam the crawler tests stub with an in-memory
//! site map.

mod client;
mod response;

pub use client::HttpClient;
pub use response::Response;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::FetchError;

/// Page fetch contract: one GET, no retries
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        cookies: &HashMap<String, String>,
    ) -> Result<Response, FetchError>;
}
