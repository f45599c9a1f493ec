//! Route extraction from source text.
//!
//! A lightweight token scan, not a parser: route registrations of the shape
//! `<ident>.<method>('<path>', ...)` are matched textually, and anything
//! that does not conform is silently not matched. Under-detection is the
//! accepted failure mode; extraction never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{Safeguard, SafeguardCatalog};

/// Base segment prepended to relative declared paths.
const API_BASE: &str = "/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Use,
}

impl Method {
    fn from_keyword(kw: &str) -> Option<Self> {
        match kw {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            "use" => Some(Self::Use),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Use => "USE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered endpoint declaration.
#[derive(Debug, Clone)]
pub struct RouteDeclaration {
    pub method: Method,
    /// The path literal as written in source.
    pub declared_path: String,
    /// Declared path normalized to an absolute route.
    pub full_path: String,
    /// Text window from the registration call to its statement boundary.
    /// Only used as the search window for safeguard detection.
    pub span: String,
}

/// Everything extracted from one file.
#[derive(Debug, Default)]
pub struct FileRoutes {
    /// True if any whole-router `.use(...)` registration in the file
    /// carries authentication middleware. Inherited by every route below.
    pub global_auth: bool,
    pub routes: Vec<RouteDeclaration>,
}

static ROUTE_CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b[A-Za-z_$][A-Za-z0-9_$]*\.(get|post|put|patch|delete|use)\s*\(\s*(['"`])([^'"`]*)['"`]"#,
    )
    .unwrap()
});

static ROUTER_USE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z_$][A-Za-z0-9_$]*\.use\s*\(").unwrap());

/// Scan one file's text for route declarations and file-wide authentication.
pub fn extract_routes(content: &str, catalog: &dyn SafeguardCatalog) -> FileRoutes {
    let global_auth = ROUTER_USE_RE.find_iter(content).any(|m| {
        let arg = call_argument(content, m.end());
        catalog.detects(Safeguard::Authentication, arg)
    });

    let routes = ROUTE_CALL_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let method = Method::from_keyword(caps.get(1)?.as_str())?;
            let declared_path = caps.get(3)?.as_str().to_string();
            let start = caps.get(0)?.start();
            Some(RouteDeclaration {
                method,
                full_path: normalize_path(&declared_path),
                declared_path,
                span: definition_span(content, start).to_string(),
            })
        })
        .collect();

    FileRoutes {
        global_auth,
        routes,
    }
}

fn normalize_path(declared: &str) -> String {
    if declared.starts_with('/') {
        declared.to_string()
    } else {
        format!("{API_BASE}/{declared}")
    }
}

/// The text from `start` up to the statement terminator that closes the
/// registration, or end-of-file if none. Delimiter depth and string
/// literals are tracked so a `;` inside the argument list never truncates
/// the span.
fn definition_span(content: &str, start: usize) -> &str {
    let bytes = content.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' | b'[' | b'{' => depth += 1,
                b')' | b']' | b'}' => depth -= 1,
                b';' if depth <= 0 => return &content[start..i],
                _ => {}
            },
        }
        i += 1;
    }
    &content[start..]
}

/// The argument text of a call whose opening parenthesis ends at
/// `after_open`, excluding the parentheses themselves.
fn call_argument(content: &str, after_open: usize) -> &str {
    let bytes = content.as_bytes();
    let mut depth = 1i32;
    let mut quote: Option<u8> = None;
    let mut i = after_open;
    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return &content[after_open..i];
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    &content[after_open..]
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::catalog::PatternCatalog;
    use proptest::prelude::*;

    proptest! {
        // Extraction must absorb arbitrary text without panicking, and
        // every emitted route must carry an absolute normalized path.
        #[test]
        fn extraction_is_total(content in ".{0,400}") {
            let extracted = extract_routes(&content, &PatternCatalog::new());
            for route in &extracted.routes {
                prop_assert!(route.full_path.starts_with('/'));
            }
        }
    }
}
