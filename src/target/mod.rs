//! Scan target model and target-list loading

mod loader;

pub use loader::{load_targets, parse_csv, parse_json};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Dispatch priority; High targets are crawled first so time-boxed
/// runs surface the most important findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// One web origin plus its crawl configuration
///
/// Immutable once a scan starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Seed URL
    pub url: String,

    /// Registrable domain used for same-domain confinement
    #[serde(default)]
    pub domain: String,

    /// Maximum crawl depth from the seed
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Maximum pages scanned for this target
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Fetch and scan linked .js assets
    #[serde(default = "default_true")]
    pub scan_js: bool,

    /// Fetch and scan linked .css assets
    #[serde(default)]
    pub scan_css: bool,

    /// Follow links to other domains
    #[serde(default)]
    pub follow_external: bool,

    /// Cookies sent with every request for this target
    #[serde(default)]
    pub cookies: HashMap<String, String>,

    /// Extra headers sent with every request for this target
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Dispatch priority
    #[serde(default)]
    pub priority: Priority,

    /// Free-form per-target metadata
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn default_depth() -> usize {
    2
}

fn default_max_pages() -> usize {
    50
}

fn default_true() -> bool {
    true
}

impl Target {
    /// Create a target with defaults from a seed URL
    pub fn new(url: &str) -> Self {
        let mut target = Self {
            url: url.to_string(),
            domain: String::new(),
            depth: default_depth(),
            max_pages: default_max_pages(),
            scan_js: true,
            scan_css: false,
            follow_external: false,
            cookies: HashMap::new(),
            headers: HashMap::new(),
            priority: Priority::default(),
            metadata: HashMap::new(),
        };
        target.fill_domain();
        target
    }

    /// Derive the domain from the seed URL when the loader left it empty
    pub fn fill_domain(&mut self) {
        if self.domain.is_empty() {
            if let Ok(parsed) = url::Url::parse(&self.url) {
                if let Some(host) = parsed.host_str() {
                    self.domain = host.trim_start_matches("www.").to_string();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_derived_from_url() {
        let target = Target::new("https://www.example.com/start");
        assert_eq!(target.domain, "example.com");
        assert_eq!(target.depth, 2);
        assert!(target.scan_js);
        assert!(!target.follow_external);
    }

    #[test]
    fn test_priority_sort_order() {
        let mut priorities = vec![Priority::Low, Priority::High, Priority::Medium];
        priorities.sort();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_priority_from_str_defaults_medium() {
        assert_eq!(Priority::from_str("HIGH"), Priority::High);
        assert_eq!(Priority::from_str("garbage"), Priority::Medium);
    }
}
