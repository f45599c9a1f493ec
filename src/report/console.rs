use crate::classify::Finding;
use crate::report::ScanResult;

/// Render the scan result as a plain-text report: summary, issues,
/// warnings, recommendations (verbose only), verdict banner.
pub fn render(result: &ScanResult, verbose: bool) -> String {
    let mut out = String::new();

    out.push_str("Route Security Audit\n");
    out.push_str("====================\n\n");

    out.push_str("Summary\n");
    push_counter(&mut out, "Total routes", result.total_routes);
    push_counter(&mut out, "Protected routes", result.protected_routes);
    push_counter(&mut out, "Public routes", result.public_routes);
    push_counter(
        &mut out,
        "Admin routes with authorization",
        result.admin_routes_with_authorization,
    );
    push_counter(&mut out, "Issues (HIGH)", result.issues.len());
    push_counter(&mut out, "Warnings (MEDIUM)", result.warnings.len());
    out.push('\n');

    if !result.issues.is_empty() {
        out.push_str("Issues (HIGH)\n");
        push_findings(&mut out, &result.issues);
    }

    if !result.warnings.is_empty() {
        out.push_str("Warnings (MEDIUM)\n");
        push_findings(&mut out, &result.warnings);
    }

    if verbose && !result.recommendations.is_empty() {
        out.push_str("Recommendations (LOW)\n");
        push_findings(&mut out, &result.recommendations);
    }

    let verdict = result.verdict();
    if verdict.pass {
        out.push_str("Result: PASS — no high-severity issues\n");
    } else {
        out.push_str(&format!(
            "Result: FAIL — {} high-severity issue(s)\n",
            verdict.issues
        ));
    }

    out
}

fn push_counter(out: &mut String, label: &str, value: usize) {
    out.push_str(&format!("  {label:<33} {value}\n"));
}

fn push_findings(out: &mut String, findings: &[Finding]) {
    for finding in findings {
        out.push_str(&format!("  [{}] {}\n", finding.severity, finding.route));
        out.push_str(&format!("         in  {}\n", finding.file));
        out.push_str(&format!("         {}\n", finding.issue));
        out.push_str(&format!("         fix: {}\n", finding.recommendation));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{Assessment, Finding, RouteClass, Severity};
    use pretty_assertions::assert_eq;

    fn sample_result() -> ScanResult {
        let mut result = ScanResult::default();
        result.absorb(Assessment {
            route: "GET /health".into(),
            class: RouteClass::Public,
            findings: vec![],
        });
        result.absorb(Assessment {
            route: "DELETE /api/users/:id".into(),
            class: RouteClass::Protected { admin_authorized: false },
            findings: vec![
                Finding {
                    severity: Severity::High,
                    file: "userRoutes.js".into(),
                    route: "DELETE /api/users/:id".into(),
                    issue: "Admin route missing authorization middleware",
                    recommendation: "Add a role or permission check after authentication for elevated-privilege operations",
                },
                Finding {
                    severity: Severity::Low,
                    file: "userRoutes.js".into(),
                    route: "DELETE /api/users/:id".into(),
                    issue: "Consider adding rate limiting",
                    recommendation: "Apply a rate limiter to write and delete operations to slow abuse",
                },
            ],
        });
        result
    }

    #[test]
    fn report_layout_is_stable() {
        let rendered = render(&sample_result(), false);
        let expected = "\
Route Security Audit
====================

Summary
  Total routes                      2
  Protected routes                  1
  Public routes                     1
  Admin routes with authorization   0
  Issues (HIGH)                     1
  Warnings (MEDIUM)                 0

Issues (HIGH)
  [HIGH] DELETE /api/users/:id
         in  userRoutes.js
         Admin route missing authorization middleware
         fix: Add a role or permission check after authentication for elevated-privilege operations

Result: FAIL — 1 high-severity issue(s)
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn recommendations_block_requires_verbose() {
        let result = sample_result();
        let quiet = render(&result, false);
        assert!(!quiet.contains("Recommendations (LOW)"));
        let verbose = render(&result, true);
        assert!(verbose.contains("Recommendations (LOW)"));
        assert!(verbose.contains("Consider adding rate limiting"));
    }

    #[test]
    fn clean_scan_passes() {
        let rendered = render(&ScanResult::default(), false);
        assert!(rendered.contains("Result: PASS"));
        assert!(!rendered.contains("Issues (HIGH)\n  ["));
    }
}
