//! Per-route policy evaluation.
//!
//! Each route is evaluated once, in file order, against the safeguard
//! catalog. Every applicable rule fires independently; a route missing
//! three safeguards yields three findings. Severity is fixed per rule and
//! never recomputed downstream.

use serde::Serialize;

use crate::catalog::{Safeguard, SafeguardCatalog};
use crate::extract::{Method, RouteDeclaration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// One reported policy violation or advisory.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub file: String,
    /// `"<METHOD> <fullPath>"`.
    pub route: String,
    pub issue: &'static str,
    pub recommendation: &'static str,
}

/// Per-file state shared read-only by every route in the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileContext {
    pub global_auth: bool,
}

/// How a route was classified, beyond its findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Allowlisted; exempt from every remaining rule.
    Public,
    Protected {
        /// True only for admin routes that do carry authorization.
        admin_authorized: bool,
    },
}

/// The classifier's verdict on one route.
#[derive(Debug)]
pub struct Assessment {
    pub route: String,
    pub class: RouteClass,
    pub findings: Vec<Finding>,
}

const MUTATING: &[Method] = &[Method::Post, Method::Put, Method::Patch];
const RATE_SENSITIVE: &[Method] = &[Method::Post, Method::Delete];

/// Evaluate one extracted route against the policy.
pub fn classify(
    route: &RouteDeclaration,
    ctx: FileContext,
    catalog: &dyn SafeguardCatalog,
    file: &str,
) -> Assessment {
    let label = format!("{} {}", route.method, route.full_path);

    if catalog.is_public_path(&route.full_path) || catalog.is_public_path(&route.declared_path) {
        return Assessment {
            route: label,
            class: RouteClass::Public,
            findings: Vec::new(),
        };
    }

    let authenticated =
        ctx.global_auth || catalog.detects(Safeguard::Authentication, &route.span);

    let mut findings = Vec::new();
    let mut push = |severity, issue, recommendation| {
        findings.push(Finding {
            severity,
            file: file.to_string(),
            route: label.clone(),
            issue,
            recommendation,
        });
    };

    if !authenticated {
        push(
            Severity::High,
            "Missing authentication middleware",
            "Attach authentication middleware to this route, or register it router-wide before any route declarations",
        );
    }

    let admin = catalog.is_admin_route(route.method.as_str(), &route.full_path);
    let admin_authorized = if admin {
        let authorized = catalog.detects(Safeguard::Authorization, &route.span);
        if !authorized {
            push(
                Severity::High,
                "Admin route missing authorization middleware",
                "Add a role or permission check after authentication for elevated-privilege operations",
            );
        }
        authorized
    } else {
        false
    };

    if MUTATING.contains(&route.method) {
        if !catalog.detects(Safeguard::Validation, &route.span) {
            push(
                Severity::Medium,
                "Missing input validation",
                "Validate the request body against a schema before it reaches the handler",
            );
        }
        if !catalog.detects(Safeguard::Sanitization, &route.span) {
            push(
                Severity::Medium,
                "Missing input sanitization",
                "Sanitize request input to strip markup and script content before use",
            );
        }
    }

    if RATE_SENSITIVE.contains(&route.method)
        && !catalog.detects(Safeguard::RateLimiting, &route.span)
    {
        push(
            Severity::Low,
            "Consider adding rate limiting",
            "Apply a rate limiter to write and delete operations to slow abuse",
        );
    }

    Assessment {
        route: label,
        class: RouteClass::Protected { admin_authorized },
        findings,
    }
}
