//! Credential-exposure findings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patterns::RiskLevel;

/// A single detected secret-like value
///
/// Never mutated after creation; risk is derived at creation time from
/// the pattern type and contextual signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique ID
    pub id: String,

    /// Pattern type name, e.g. `google_api_key`
    pub pattern_type: String,

    /// The matched value
    pub value: String,

    /// URL where the value was found
    pub source_url: String,

    /// Detection confidence (0.0 - 1.0)
    pub confidence: f64,

    /// Severity bucket
    pub risk_level: RiskLevel,

    /// Category, e.g. `cloud`, `payment`
    pub category: String,

    /// Detection timestamp
    pub detected_at: DateTime<Utc>,
}

impl Finding {
    /// Create a new finding
    pub fn new(
        pattern_type: &str,
        value: &str,
        source_url: &str,
        risk_level: RiskLevel,
        confidence: f64,
        category: &str,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pattern_type: pattern_type.to_string(),
            value: value.to_string(),
            source_url: source_url.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
            risk_level,
            category: category.to_string(),
            detected_at: Utc::now(),
        }
    }

    /// Value truncated for persisted reports so full secrets never land
    /// in plaintext output
    pub fn truncated_value(&self, max_chars: usize) -> String {
        self.value.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_clamped() {
        let finding = Finding::new("jwt", "eyJx.eyJy.zz", "https://example.com", RiskLevel::Medium, 1.7, "auth");
        assert_eq!(finding.confidence, 1.0);
    }

    #[test]
    fn test_truncated_value() {
        let long = "a".repeat(250);
        let finding = Finding::new("generic_secret", &long, "https://example.com", RiskLevel::Medium, 0.5, "generic");
        assert_eq!(finding.truncated_value(100).len(), 100);
    }
}
