//! CSV Report Generator
//!
//! Spreadsheet-compatible findings export, one row per finding.

use anyhow::Result;

use crate::batch::BatchResult;
use crate::config::ReportConfig;

/// Generate a findings CSV across the whole batch
pub fn generate(batch: &BatchResult, config: &ReportConfig) -> Result<String> {
    let mut csv = String::new();

    csv.push_str("Target,Pattern Type,Risk Level,Confidence,Value,Found At,Category\n");

    for result in &batch.results {
        for finding in &result.findings {
            let row = vec![
                csv_escape(&result.target.url),
                csv_escape(&finding.pattern_type),
                finding.risk_level.name().to_string(),
                format!("{:.2}", finding.confidence),
                csv_escape(&finding.truncated_value(config.value_truncate)),
                csv_escape(&finding.source_url),
                csv_escape(&finding.category),
            ];

            csv.push_str(&row.join(","));
            csv.push('\n');
        }
    }

    Ok(csv)
}

/// Escape a value for CSV (handle commas, quotes, newlines)
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
