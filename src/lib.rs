//! routeguard — static security auditor for HTTP route declarations.
//!
//! Scans a directory of route-definition modules and verifies that each
//! endpoint carries the expected safeguards: authentication, authorization,
//! input validation, input sanitization, and rate limiting. Purely textual
//! and read-only; emits a severity-classified report and a PASS/FAIL
//! verdict.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use routeguard::{audit, ScanOptions};
//!
//! let report = audit(Path::new("./server/routes"), &ScanOptions::default()).unwrap();
//! println!("pass: {}", report.result.verdict().pass);
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod discover;
pub mod error;
pub mod extract;
pub mod report;

use std::path::{Path, PathBuf};

use classify::FileContext;
use config::Config;
use error::Result;
use report::{OutputFormat, ScanResult};

/// Options for one audit invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.routeguard.toml` in the scan root).
    pub config_path: Option<PathBuf>,
    /// CLI override for the recommendations block.
    pub verbose_override: Option<bool>,
}

/// Complete audit report: the aggregate result plus rendering options
/// resolved from config and CLI.
#[derive(Debug)]
pub struct AuditReport {
    pub result: ScanResult,
    pub verbose: bool,
}

/// Run a complete audit: discover route files, extract declarations,
/// classify each against the safeguard catalog, aggregate.
///
/// Files are visited in sorted order and routes in file order, so repeated
/// runs over an unchanged tree produce byte-identical reports. A file that
/// cannot be read is logged and skipped; only a missing root aborts.
pub fn audit(root: &Path, options: &ScanOptions) -> Result<AuditReport> {
    let config_path = options
        .config_path
        .clone()
        .unwrap_or_else(|| root.join(".routeguard.toml"));
    let config = Config::load(&config_path)?;
    let catalog = config.catalog()?;

    let mut result = ScanResult::default();
    for file in discover::route_files(root)? {
        let content = match std::fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "unreadable route file, skipping");
                continue;
            }
        };

        let extracted = extract::extract_routes(&content, &catalog);
        let ctx = FileContext {
            global_auth: extracted.global_auth,
        };
        let rel = file
            .strip_prefix(root)
            .unwrap_or(&file)
            .to_string_lossy()
            .into_owned();

        for route in &extracted.routes {
            result.absorb(classify::classify(route, ctx, &catalog, &rel));
        }
    }

    Ok(AuditReport {
        result,
        verbose: options.verbose_override.unwrap_or(config.report.verbose),
    })
}

/// Render an audit report in the specified format.
pub fn render_report(report: &AuditReport, format: OutputFormat) -> Result<String> {
    report::render(&report.result, format, report.verbose)
}
