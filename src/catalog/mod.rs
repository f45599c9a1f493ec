//! Safeguard pattern catalog and policy tables.
//!
//! Detection is textual: each safeguard is recognized by conventional
//! middleware/call identifiers, not by resolving what the symbols actually
//! do. The `SafeguardCatalog` trait is the seam where a structural
//! (syntax-tree) backend could be substituted without touching the
//! classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The five audited cross-cutting safeguards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Safeguard {
    Authentication,
    Authorization,
    RateLimiting,
    Validation,
    Sanitization,
}

impl std::fmt::Display for Safeguard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Authorization => write!(f, "authorization"),
            Self::RateLimiting => write!(f, "rate-limiting"),
            Self::Validation => write!(f, "validation"),
            Self::Sanitization => write!(f, "sanitization"),
        }
    }
}

static AUTHENTICATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(authenticate\w*|requireAuth\w*|isAuthenticated|ensureAuth\w*|verifyToken|verifyJwt|checkAuth\w*|jwtAuth\w*|authMiddleware|passport\.authenticate)\b",
    )
    .unwrap()
});

static AUTHORIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(authorize\w*|requireRole\w*|requireAdmin|isAdmin|adminOnly|checkRole\w*|hasRole\w*|ensureRole\w*|checkPermission\w*|requirePermission\w*)\b",
    )
    .unwrap()
});

static RATE_LIMIT_RE: Lazy<Regex> = Lazy::new(|| {
    // Limiters are conventionally suffixed (loginLimiter, writeLimiter), so
    // this one matches anywhere inside an identifier.
    Regex::new(r"(?i)\b(ratelimit\w*|\w*limiter\w*|slowdown|throttle\w*)\b").unwrap()
});

static VALIDATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(validate\w*|validator\w*|checkSchema|celebrate)\b").unwrap()
});

static SANITIZATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(saniti[sz]e\w*|xss\w*|escapeHtml|mongoSanitize|cleanInput)\b").unwrap()
});

/// Path segments exempt from protected-route policy checks: registration,
/// login and token lifecycle, health probes, inbound webhooks.
pub const PUBLIC_ALLOWLIST: &[&str] = &[
    "register",
    "signup",
    "login",
    "logout",
    "refresh",
    "forgot-password",
    "reset-password",
    "verify-email",
    "health",
    "status",
    "ping",
    "webhook",
];

/// One elevated-privilege route shape: an optional method constraint plus a
/// path pattern.
pub struct AdminPattern {
    pub method: Option<&'static str>,
    pub path: Regex,
    pub label: &'static str,
}

static ADMIN_PATTERNS: Lazy<Vec<AdminPattern>> = Lazy::new(|| {
    vec![
        AdminPattern {
            method: None,
            path: Regex::new(r"(?i)(^|/)admin(/|$)").unwrap(),
            label: "administrative sub-path",
        },
        AdminPattern {
            method: None,
            path: Regex::new(r"(?i)/users?/:\w+").unwrap(),
            label: "another user's resource by id",
        },
        AdminPattern {
            method: Some("DELETE"),
            path: Regex::new(r"(?i)(^|/)users?(/|$)").unwrap(),
            label: "delete-user operation",
        },
        AdminPattern {
            method: None,
            path: Regex::new(r"(?i)(^|/)delete(/|$)").unwrap(),
            label: "delete action segment",
        },
        AdminPattern {
            method: None,
            path: Regex::new(r"(?i)(^|/)(analytics|reports?|exports?)(/|$)").unwrap(),
            label: "analytics/report/export endpoint",
        },
    ]
});

/// Built-in admin patterns, exposed for `list-patterns` output.
pub fn admin_patterns() -> &'static [AdminPattern] {
    &ADMIN_PATTERNS
}

/// Built-in detector for one safeguard, exposed for `list-patterns` output.
pub fn safeguard_pattern(safeguard: Safeguard) -> &'static Regex {
    match safeguard {
        Safeguard::Authentication => &AUTHENTICATION_RE,
        Safeguard::Authorization => &AUTHORIZATION_RE,
        Safeguard::RateLimiting => &RATE_LIMIT_RE,
        Safeguard::Validation => &VALIDATION_RE,
        Safeguard::Sanitization => &SANITIZATION_RE,
    }
}

/// All safeguards in catalog order.
pub const ALL_SAFEGUARDS: &[Safeguard] = &[
    Safeguard::Authentication,
    Safeguard::Authorization,
    Safeguard::RateLimiting,
    Safeguard::Validation,
    Safeguard::Sanitization,
];

/// The policy surface the classifier evaluates against.
pub trait SafeguardCatalog {
    /// True if `text` contains a recognizable use of `safeguard`.
    fn detects(&self, safeguard: Safeguard, text: &str) -> bool;

    /// True if any segment of `path` is an allowlisted public fragment.
    fn is_public_path(&self, path: &str) -> bool;

    /// True if `method` + `path` identify an elevated-privilege operation.
    fn is_admin_route(&self, method: &str, path: &str) -> bool;
}

/// Regex-backed catalog: the built-in tables plus any per-repo extensions
/// from config.
pub struct PatternCatalog {
    extra_public: Vec<String>,
    extra_admin: Vec<Regex>,
}

impl PatternCatalog {
    pub fn new() -> Self {
        Self {
            extra_public: Vec::new(),
            extra_admin: Vec::new(),
        }
    }

    /// Extend the built-in tables. Invalid extra admin patterns are
    /// rejected so a bad config fails loudly instead of silently auditing
    /// with a weaker policy.
    pub fn with_extensions(
        extra_public: Vec<String>,
        extra_admin: &[String],
    ) -> Result<Self, regex::Error> {
        let extra_admin = extra_admin
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            extra_public,
            extra_admin,
        })
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SafeguardCatalog for PatternCatalog {
    fn detects(&self, safeguard: Safeguard, text: &str) -> bool {
        safeguard_pattern(safeguard).is_match(text)
    }

    fn is_public_path(&self, path: &str) -> bool {
        // Whole-segment matching: a path is public only if an allowlist
        // entry equals one of its segments, never by free substring
        // containment ("/stealthy" must not match "health").
        path.split('/').filter(|s| !s.is_empty()).any(|segment| {
            PUBLIC_ALLOWLIST.contains(&segment)
                || self.extra_public.iter().any(|e| e == segment)
        })
    }

    fn is_admin_route(&self, method: &str, path: &str) -> bool {
        let builtin = ADMIN_PATTERNS.iter().any(|p| {
            p.method.map_or(true, |m| m == method) && p.path.is_match(path)
        });
        builtin || self.extra_admin.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_authentication_middleware() {
        let catalog = PatternCatalog::new();
        let span = "router.get('/profile', authenticate, getProfile)";
        assert!(catalog.detects(Safeguard::Authentication, span));
        assert!(!catalog.detects(Safeguard::Authorization, span));
    }

    #[test]
    fn detects_each_safeguard_by_conventional_name() {
        let catalog = PatternCatalog::new();
        assert!(catalog.detects(Safeguard::Authorization, "requireRole('admin')"));
        assert!(catalog.detects(Safeguard::RateLimiting, "loginLimiter"));
        assert!(catalog.detects(Safeguard::Validation, "validateBody(schema)"));
        assert!(catalog.detects(Safeguard::Sanitization, "sanitizeInput"));
    }

    #[test]
    fn authorization_name_does_not_satisfy_authentication() {
        let catalog = PatternCatalog::new();
        assert!(!catalog.detects(Safeguard::Authentication, "authorize('admin')"));
    }

    #[test]
    fn public_match_is_segment_based() {
        let catalog = PatternCatalog::new();
        assert!(catalog.is_public_path("/health"));
        assert!(catalog.is_public_path("/api/auth/login"));
        // Substring containment must not classify these as public.
        assert!(!catalog.is_public_path("/stealthy"));
        assert!(!catalog.is_public_path("/healthcheck-config"));
    }

    #[test]
    fn admin_patterns_cover_elevated_shapes() {
        let catalog = PatternCatalog::new();
        assert!(catalog.is_admin_route("GET", "/api/admin/settings"));
        assert!(catalog.is_admin_route("POST", "/users/:id/delete"));
        assert!(catalog.is_admin_route("DELETE", "/api/users"));
        assert!(catalog.is_admin_route("PATCH", "/api/reports/:id"));
        assert!(catalog.is_admin_route("GET", "/api/analytics"));
        assert!(!catalog.is_admin_route("GET", "/api/profile"));
    }

    #[test]
    fn config_extensions_extend_tables() {
        let catalog = PatternCatalog::with_extensions(
            vec!["metrics".into()],
            &["(^|/)billing(/|$)".into()],
        )
        .unwrap();
        assert!(catalog.is_public_path("/metrics"));
        assert!(catalog.is_admin_route("GET", "/api/billing/invoices"));
    }

    #[test]
    fn invalid_admin_extension_is_rejected() {
        assert!(PatternCatalog::with_extensions(vec![], &["(".into()]).is_err());
    }
}
