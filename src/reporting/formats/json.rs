//! JSON Report Generator
//!
//! Writes the machine-readable batch document. Finding values are
//! truncated so full secrets never land in plaintext reports.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use crate::batch::BatchResult;
use crate::config::ReportConfig;
use crate::reporting::ExecutiveReport;

/// Generate the batch scan JSON document
pub fn generate(batch: &BatchResult, config: &ReportConfig) -> Result<String> {
    let scan_results: Vec<_> = batch
        .results
        .iter()
        .map(|result| {
            let findings: Vec<_> = result
                .findings
                .iter()
                .map(|f| {
                    json!({
                        "pattern_type": f.pattern_type,
                        "value": f.truncated_value(config.value_truncate),
                        "confidence": f.confidence,
                        "risk_level": f.risk_level.as_str(),
                        "url": f.source_url,
                        "category": f.category,
                    })
                })
                .collect();

            let mut urls: Vec<&String> = result.urls_discovered.iter().collect();
            urls.sort();

            json!({
                "target_url": result.target.url,
                "target_domain": result.target.domain,
                "pages_scanned": result.pages_scanned,
                "scan_duration": result.scan_duration.as_secs_f64(),
                "findings_count": result.findings.len(),
                "urls_discovered": urls,
                "findings": findings,
                "errors": result.errors,
            })
        })
        .collect();

    let document = json!({
        "batch_scan_summary": {
            "timestamp": Utc::now().to_rfc3339(),
            "targets_scanned": batch.targets_scanned,
            "total_findings": batch.total_findings,
            "high_risk_findings": batch.high_risk_findings,
            "total_scan_time": batch.total_scan_time.as_secs_f64(),
            "failed_targets": batch.failed_targets,
        },
        "executive_summary": ExecutiveReport::from_batch(batch),
        "scan_results": scan_results,
    });

    Ok(serde_json::to_string_pretty(&document)?)
}
