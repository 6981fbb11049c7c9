//! Target-list loading
//!
//! Parses CSV or JSON target lists. CSV columns: `url, domain, priority,
//! depth, max_pages, scan_js`; unknown columns are folded into per-target
//! metadata, and quoted fields may contain commas. JSON accepts either a
//! top-level array of target objects or `{"targets": [...]}`.

use serde::Deserialize;
use std::path::Path;

use super::{Priority, Target};
use crate::error::LoaderError;

/// Load targets from a CSV or JSON file, dispatching on extension
pub fn load_targets(path: &Path) -> Result<Vec<Target>, LoaderError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LoaderError::ReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let targets = match extension.as_str() {
        "csv" => parse_csv(&contents)?,
        "json" => parse_json(&contents)?,
        other => return Err(LoaderError::UnsupportedFormat(other.to_string())),
    };

    if targets.is_empty() {
        return Err(LoaderError::Empty);
    }

    tracing::info!(count = targets.len(), path = %path.display(), "Loaded target list");
    Ok(targets)
}

/// Parse a CSV target list
pub fn parse_csv(contents: &str) -> Result<Vec<Target>, LoaderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| LoaderError::ParseError(e.to_string()))?
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    if !columns.iter().any(|c| c == "url") {
        return Err(LoaderError::MissingColumn("url".to_string()));
    }

    let mut targets = Vec::new();

    for (line_no, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoaderError::ParseError(e.to_string()))?;
        let mut target = Target::new("");

        for (column, value) in columns.iter().zip(record.iter()) {
            if value.is_empty() {
                continue;
            }
            match column.as_str() {
                "url" => target.url = value.to_string(),
                "domain" => target.domain = value.to_string(),
                "priority" => target.priority = Priority::from_str(value),
                "depth" => {
                    target.depth = value.parse().map_err(|_| {
                        LoaderError::ParseError(format!("bad depth '{}' on line {}", value, line_no + 2))
                    })?
                }
                "max_pages" => {
                    target.max_pages = value.parse().map_err(|_| {
                        LoaderError::ParseError(format!("bad max_pages '{}' on line {}", value, line_no + 2))
                    })?
                }
                "scan_js" => target.scan_js = matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"),
                "scan_css" => target.scan_css = matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"),
                "follow_external" => {
                    target.follow_external = matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
                }
                // Arbitrary extra columns become metadata
                other => {
                    target.metadata.insert(other.to_string(), value.to_string());
                }
            }
        }

        if target.url.is_empty() {
            return Err(LoaderError::ParseError(format!("missing url on line {}", line_no + 2)));
        }

        target.fill_domain();
        targets.push(target);
    }

    Ok(targets)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetDocument {
    Wrapped { targets: Vec<Target> },
    Bare(Vec<Target>),
}

/// Parse a JSON target list (top-level array or `{"targets": [...]}`)
pub fn parse_json(contents: &str) -> Result<Vec<Target>, LoaderError> {
    let document: TargetDocument =
        serde_json::from_str(contents).map_err(|e| LoaderError::ParseError(e.to_string()))?;

    let mut targets = match document {
        TargetDocument::Wrapped { targets } => targets,
        TargetDocument::Bare(targets) => targets,
    };

    for target in &mut targets {
        target.fill_domain();
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_extra_columns() {
        let csv = "url,domain,priority,depth,max_pages,scan_js,owner\n\
                   https://shop.example.com,example.com,high,2,30,true,payments-team\n\
                   https://blog.example.com,,low,1,10,false,content-team\n";

        let targets = parse_csv(csv).unwrap();
        assert_eq!(targets.len(), 2);

        assert_eq!(targets[0].priority, Priority::High);
        assert_eq!(targets[0].max_pages, 30);
        assert!(targets[0].scan_js);
        assert_eq!(targets[0].metadata.get("owner").unwrap(), "payments-team");

        // Empty domain cell falls back to the URL host
        assert_eq!(targets[1].domain, "blog.example.com");
        assert!(!targets[1].scan_js);
    }

    #[test]
    fn test_parse_csv_quoted_field_keeps_embedded_comma() {
        let csv = "url,owner,priority\n\
                   https://shop.example.com,\"payments, team\",high\n";

        let targets = parse_csv(csv).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].metadata.get("owner").unwrap(), "payments, team");
        assert_eq!(targets[0].priority, Priority::High);
    }

    #[test]
    fn test_parse_csv_requires_url_column() {
        let csv = "domain,priority\nexample.com,high\n";
        assert!(matches!(parse_csv(csv), Err(LoaderError::MissingColumn(_))));
    }

    #[test]
    fn test_parse_csv_rejects_bad_depth() {
        let csv = "url,depth\nhttps://example.com,deep\n";
        assert!(matches!(parse_csv(csv), Err(LoaderError::ParseError(_))));
    }

    #[test]
    fn test_parse_json_bare_array() {
        let json = r#"[{"url": "https://example.com", "priority": "high"}]"#;
        let targets = parse_json(json).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].priority, Priority::High);
        assert_eq!(targets[0].domain, "example.com");
    }

    #[test]
    fn test_parse_json_wrapped_object() {
        let json = r#"{"targets": [
            {"url": "https://example.com", "depth": 3, "metadata": {"env": "prod"}}
        ]}"#;
        let targets = parse_json(json).unwrap();
        assert_eq!(targets[0].depth, 3);
        assert_eq!(targets[0].metadata.get("env").unwrap(), "prod");
    }

    #[test]
    fn test_parse_json_malformed_is_error() {
        assert!(matches!(parse_json("{nope"), Err(LoaderError::ParseError(_))));
    }
}
