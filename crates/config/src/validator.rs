//! Configuration validation
//!
//! Collects every problem in one pass instead of failing on the first,
//! so an operator can fix a config file in one round trip.

use crate::substitution::has_unresolved_env_vars;
use crate::AppConfig;
use std::collections::HashSet;

/// One finding from validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Everything validation found, split by severity
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn warning(&mut self, field: &str, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.into(),
        });
    }
}

/// Validate a configuration, returning every error and warning found
pub fn validate_config(config: &AppConfig) -> ValidationReport {
    let mut report = ValidationReport::default();

    if config.service.name.trim().is_empty() {
        report.error("service.name", "service name must not be empty");
    }

    if config.engine.symbols.is_empty() {
        report.error("engine.symbols", "at least one symbol must be registered");
    }
    let mut seen = HashSet::new();
    for symbol in &config.engine.symbols {
        if symbol.trim().is_empty() {
            report.error("engine.symbols", "symbol must not be empty");
            continue;
        }
        if !seen.insert(symbol.as_str()) {
            report.error(
                "engine.symbols",
                format!("duplicate symbol: {symbol}"),
            );
        }
        if symbol.chars().any(|c| c.is_ascii_lowercase()) {
            report.warning(
                "engine.symbols",
                format!("symbol {symbol} is not uppercase"),
            );
        }
    }
    if config.engine.view_depth == 0 {
        report.warning("engine.view_depth", "view depth of 0 renders empty books");
    }

    if config.server.host.trim().is_empty() {
        report.error("server.host", "host must not be empty");
    } else if has_unresolved_env_vars(&config.server.host) {
        report.error(
            "server.host",
            format!("unresolved environment variable: {}", config.server.host),
        );
    }
    if config.server.port == 0 {
        report.error("server.port", "port must not be 0");
    }

    if !matches!(
        config.logging.format.to_lowercase().as_str(),
        "pretty" | "json" | "compact"
    ) {
        report.error(
            "logging.format",
            format!(
                "unknown format '{}', expected pretty, json or compact",
                config.logging.format
            ),
        );
    }
    if config.logging.level.trim().is_empty() {
        report.warning("logging.level", "empty level falls back to 'info'");
    }

    report
}
