//! Report Generation Module
//!
//! Derives the executive summary from a completed batch and writes
//! machine-readable sinks (JSON, CSV). The executive report is a pure
//! view over a `BatchResult` snapshot and is regenerated on demand.

pub mod formats;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::batch::BatchResult;
use crate::patterns::RiskLevel;

/// How many pattern types the histogram retains
const TOP_PATTERN_COUNT: usize = 10;

/// One entry of the pattern-type histogram
#[derive(Debug, Clone, Serialize)]
pub struct PatternCount {
    pub pattern_type: String,
    pub count: usize,
}

/// Batch-level performance metrics
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    /// Pages scanned across all targets
    pub total_pages: usize,

    /// Pages per second over the whole batch
    pub pages_per_second: f64,

    /// Mean per-target crawl duration in seconds
    pub average_scan_secs: f64,
}

/// A prioritized, rule-based recommendation
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub priority: String,
    pub title: String,
    pub detail: String,
}

/// Read-only executive view over a completed batch
#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveReport {
    pub generated_at: DateTime<Utc>,

    /// Percentage of submitted targets that produced a result
    pub success_rate: f64,

    /// Findings counted by risk level
    pub risk_distribution: HashMap<String, usize>,

    /// Top pattern types by finding count, descending
    pub top_patterns: Vec<PatternCount>,

    pub performance: PerformanceMetrics,

    /// Fixed order: critical exposure, hardening, coverage
    pub recommendations: Vec<Recommendation>,
}

impl ExecutiveReport {
    /// Compute the executive report from a finished batch
    pub fn from_batch(batch: &BatchResult) -> Self {
        let submitted = batch.targets_scanned + batch.failed_targets.len();
        let success_rate = if submitted == 0 {
            0.0
        } else {
            batch.targets_scanned as f64 / submitted as f64 * 100.0
        };

        let mut risk_distribution: HashMap<String, usize> = HashMap::new();
        let mut pattern_counts: HashMap<String, usize> = HashMap::new();
        let mut critical_count = 0usize;

        for result in &batch.results {
            for finding in &result.findings {
                *risk_distribution
                    .entry(finding.risk_level.name().to_string())
                    .or_insert(0) += 1;
                *pattern_counts.entry(finding.pattern_type.clone()).or_insert(0) += 1;
                if finding.risk_level == RiskLevel::Critical {
                    critical_count += 1;
                }
            }
        }

        let mut top_patterns: Vec<PatternCount> = pattern_counts
            .into_iter()
            .map(|(pattern_type, count)| PatternCount { pattern_type, count })
            .collect();
        top_patterns.sort_by(|a, b| b.count.cmp(&a.count).then(a.pattern_type.cmp(&b.pattern_type)));
        top_patterns.truncate(TOP_PATTERN_COUNT);

        let total_pages: usize = batch.results.iter().map(|r| r.pages_scanned).sum();
        let batch_secs = batch.total_scan_time.as_secs_f64();
        let performance = PerformanceMetrics {
            total_pages,
            pages_per_second: if batch_secs > 0.0 {
                total_pages as f64 / batch_secs
            } else {
                0.0
            },
            average_scan_secs: if batch.results.is_empty() {
                0.0
            } else {
                batch
                    .results
                    .iter()
                    .map(|r| r.scan_duration.as_secs_f64())
                    .sum::<f64>()
                    / batch.results.len() as f64
            },
        };

        let recommendations = build_recommendations(batch, critical_count);

        Self {
            generated_at: Utc::now(),
            success_rate,
            risk_distribution,
            top_patterns,
            performance,
            recommendations,
        }
    }
}

/// Rule-based recommendations, ordered by descending urgency
fn build_recommendations(batch: &BatchResult, critical_count: usize) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if critical_count > 0 {
        recommendations.push(Recommendation {
            priority: "critical".to_string(),
            title: "Immediate Action Required".to_string(),
            detail: format!(
                "{} critical credential exposure(s) detected. Rotate the affected secrets and remove them from client-delivered content.",
                critical_count
            ),
        });
    }

    if batch.high_risk_findings > batch.targets_scanned {
        recommendations.push(Recommendation {
            priority: "high".to_string(),
            title: "Security Hardening".to_string(),
            detail: format!(
                "{} high-risk findings across {} scanned target(s). Review secret-handling practices and move keys server-side.",
                batch.high_risk_findings, batch.targets_scanned
            ),
        });
    }

    if !batch.failed_targets.is_empty() {
        recommendations.push(Recommendation {
            priority: "medium".to_string(),
            title: "Scan Coverage".to_string(),
            detail: format!(
                "{} target(s) could not be scanned: {}. Verify reachability and re-run.",
                batch.failed_targets.len(),
                batch.failed_targets.join(", ")
            ),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::ScanResult;
    use crate::scanner::Finding;
    use crate::target::Target;
    use std::collections::HashSet;
    use std::time::Duration;

    fn result_with_findings(url: &str, findings: Vec<Finding>) -> ScanResult {
        ScanResult {
            target: Target::new(url),
            pages_scanned: 4,
            findings,
            scan_duration: Duration::from_secs(2),
            urls_discovered: HashSet::new(),
            errors: Vec::new(),
        }
    }

    fn finding(pattern: &str, risk: RiskLevel) -> Finding {
        Finding::new(pattern, "value-value-value", "https://example.com/", risk, 0.9, "generic")
    }

    fn batch(results: Vec<ScanResult>, failed: Vec<String>) -> BatchResult {
        let total_findings = results.iter().map(|r| r.findings.len()).sum();
        let high_risk_findings = results
            .iter()
            .flat_map(|r| &r.findings)
            .filter(|f| f.risk_level.is_high_risk())
            .count();
        BatchResult {
            targets_scanned: results.len(),
            total_findings,
            high_risk_findings,
            total_scan_time: Duration::from_secs(8),
            results,
            failed_targets: failed,
        }
    }

    #[test]
    fn test_success_rate() {
        let batch = batch(
            vec![result_with_findings("https://a.example.com/", vec![])],
            vec!["https://dead.example.com/".to_string()],
        );
        let report = ExecutiveReport::from_batch(&batch);
        assert!((report.success_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_risk_and_pattern_histograms() {
        let findings = vec![
            finding("google_api_key", RiskLevel::Medium),
            finding("google_api_key", RiskLevel::Medium),
            finding("stripe_secret_key", RiskLevel::Critical),
        ];
        let batch = batch(vec![result_with_findings("https://a.example.com/", findings)], vec![]);
        let report = ExecutiveReport::from_batch(&batch);

        assert_eq!(report.risk_distribution["Medium"], 2);
        assert_eq!(report.risk_distribution["Critical"], 1);
        assert_eq!(report.top_patterns[0].pattern_type, "google_api_key");
        assert_eq!(report.top_patterns[0].count, 2);
    }

    #[test]
    fn test_top_patterns_truncated_to_ten() {
        let findings: Vec<Finding> = (0..15)
            .map(|i| finding(&format!("pattern_{i:02}"), RiskLevel::Low))
            .collect();
        let batch = batch(vec![result_with_findings("https://a.example.com/", findings)], vec![]);
        let report = ExecutiveReport::from_batch(&batch);
        assert_eq!(report.top_patterns.len(), 10);
    }

    #[test]
    fn test_recommendation_order() {
        let findings = vec![
            finding("private_key", RiskLevel::Critical),
            finding("github_token", RiskLevel::High),
            finding("gitlab_token", RiskLevel::High),
        ];
        let batch = batch(
            vec![result_with_findings("https://a.example.com/", findings)],
            vec!["https://dead.example.com/".to_string()],
        );
        let report = ExecutiveReport::from_batch(&batch);

        let titles: Vec<&str> = report.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Immediate Action Required", "Security Hardening", "Scan Coverage"]
        );
    }

    #[test]
    fn test_clean_batch_has_no_recommendations() {
        let batch = batch(vec![result_with_findings("https://a.example.com/", vec![])], vec![]);
        let report = ExecutiveReport::from_batch(&batch);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_empty_batch_success_rate_is_zero() {
        let batch = batch(vec![], vec![]);
        let report = ExecutiveReport::from_batch(&batch);
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.performance.total_pages, 0);
    }
}
