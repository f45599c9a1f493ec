use serde::Serialize;

use crate::error::Result;
use crate::report::{ScanResult, Verdict};

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    verdict: Verdict,
}

/// Render the scan result as a JSON report.
pub fn render(result: &ScanResult) -> Result<String> {
    let report = JsonReport {
        result,
        verdict: result.verdict(),
    };
    let mut json = serde_json::to_string_pretty(&report)?;
    json.push('\n');
    Ok(json)
}
