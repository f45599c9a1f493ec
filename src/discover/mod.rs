//! Route-file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AuditError, Result};

/// Directories that never contain first-party route modules.
const SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "ts", "mts", "cts"];

/// Recursively enumerate route-definition modules under `root`.
///
/// Traversal is depth-first in sorted order so repeated scans report in a
/// stable order. A nonexistent root is the one fatal condition; unreadable
/// entries below it are logged and skipped.
pub fn route_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(AuditError::RootNotFound(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_skipped_dir(e.path())));

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_route_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| SKIP_DIRS.contains(&n))
}

/// A route module is a JS/TS source file whose stem carries a "route"
/// marker (routes.ts, userRoutes.js, admin.routes.js, router.ts, ...).
fn is_route_file(path: &Path) -> bool {
    let has_source_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e));
    if !has_source_ext {
        return false;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.to_ascii_lowercase().contains("route"))
}
