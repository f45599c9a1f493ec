use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::PatternCatalog;
use crate::error::{AuditError, Result};

/// Top-level configuration from `.routeguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Show the LOW-severity recommendations block.
    #[serde(default)]
    pub verbose: bool,
}

/// Per-repo extensions to the built-in policy tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Extra path segments treated as public.
    #[serde(default)]
    pub public_paths: Vec<String>,
    /// Extra admin path patterns (regular expressions).
    #[serde(default)]
    pub admin_patterns: Vec<String>,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the safeguard catalog with this config's policy extensions.
    pub fn catalog(&self) -> Result<PatternCatalog> {
        PatternCatalog::with_extensions(
            self.policy.public_paths.clone(),
            &self.policy.admin_patterns,
        )
        .map_err(|e| AuditError::Config(format!("invalid admin pattern: {e}")))
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# routeguard configuration

[report]
# Show the LOW-severity recommendations block.
verbose = false

[policy]
# Extra path segments treated as public (exempt from audit).
# public_paths = ["metrics"]

# Extra admin path patterns (regular expressions on the full route path).
# admin_patterns = ["(^|/)billing(/|$)"]
"#
    }
}
