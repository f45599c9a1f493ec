//! Scan aggregation and report rendering.

pub mod console;
pub mod json;

use serde::Serialize;

use crate::classify::{Assessment, Finding, RouteClass, Severity};
use crate::error::Result;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Aggregate outcome of one scan. Built additively, in scan order, so
/// repeated runs over an unchanged tree render byte-identical reports.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub total_routes: usize,
    pub protected_routes: usize,
    pub public_routes: usize,
    /// Admin routes that do carry authorization. Admin routes missing it
    /// are recorded solely as HIGH issues, never counted here.
    pub admin_routes_with_authorization: usize,
    pub issues: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub recommendations: Vec<Finding>,
}

impl ScanResult {
    /// Fold one route's assessment into the accumulator.
    pub fn absorb(&mut self, assessment: Assessment) {
        self.total_routes += 1;
        match assessment.class {
            RouteClass::Public => self.public_routes += 1,
            RouteClass::Protected { admin_authorized } => {
                self.protected_routes += 1;
                if admin_authorized {
                    self.admin_routes_with_authorization += 1;
                }
            }
        }
        for finding in assessment.findings {
            match finding.severity {
                Severity::High => self.issues.push(finding),
                Severity::Medium => self.warnings.push(finding),
                Severity::Low => self.recommendations.push(finding),
            }
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict {
            pass: self.issues.is_empty(),
            issues: self.issues.len(),
            warnings: self.warnings.len(),
            recommendations: self.recommendations.len(),
        }
    }
}

/// PASS/FAIL outcome. Solely a function of HIGH-severity issues; warnings
/// and recommendations never affect it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Verdict {
    pub pass: bool,
    pub issues: usize,
    pub warnings: usize,
    pub recommendations: usize,
}

impl Verdict {
    pub fn exit_code(&self) -> i32 {
        if self.pass {
            0
        } else {
            1
        }
    }
}

/// Render a scan result in the requested format.
pub fn render(result: &ScanResult, format: OutputFormat, verbose: bool) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(result, verbose)),
        OutputFormat::Json => json::render(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity) -> Finding {
        Finding {
            severity,
            file: "routes.js".into(),
            route: "POST /api/items".into(),
            issue: "Missing input validation",
            recommendation: "Validate the request body against a schema before it reaches the handler",
        }
    }

    fn assessment(class: RouteClass, findings: Vec<Finding>) -> Assessment {
        Assessment {
            route: "POST /api/items".into(),
            class,
            findings,
        }
    }

    #[test]
    fn counters_split_public_and_protected() {
        let mut result = ScanResult::default();
        result.absorb(assessment(RouteClass::Public, vec![]));
        result.absorb(assessment(
            RouteClass::Protected { admin_authorized: true },
            vec![],
        ));
        result.absorb(assessment(
            RouteClass::Protected { admin_authorized: false },
            vec![finding(Severity::High)],
        ));
        assert_eq!(result.total_routes, 3);
        assert_eq!(result.public_routes + result.protected_routes, result.total_routes);
        assert_eq!(result.admin_routes_with_authorization, 1);
    }

    #[test]
    fn findings_bucket_by_severity() {
        let mut result = ScanResult::default();
        result.absorb(assessment(
            RouteClass::Protected { admin_authorized: false },
            vec![
                finding(Severity::High),
                finding(Severity::Medium),
                finding(Severity::Low),
            ],
        ));
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn verdict_tracks_only_high_issues() {
        let mut result = ScanResult::default();
        result.absorb(assessment(
            RouteClass::Protected { admin_authorized: false },
            vec![finding(Severity::Medium), finding(Severity::Low)],
        ));
        let verdict = result.verdict();
        assert!(verdict.pass);
        assert_eq!(verdict.exit_code(), 0);

        result.absorb(assessment(
            RouteClass::Protected { admin_authorized: false },
            vec![finding(Severity::High)],
        ));
        let verdict = result.verdict();
        assert!(!verdict.pass);
        assert_eq!(verdict.exit_code(), 1);
    }
}
