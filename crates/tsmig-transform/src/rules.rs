//! Rule tables
//!
//! A [`RuleSet`] is read from TOML and validated before use. The built-in
//! table is compiled into the binary.

use serde::Deserialize;
use std::collections::HashSet;

/// Built-in rule table (Material-UI v4 to MUI v5)
pub const BUILTIN_RULES: &str = include_str!("../rules/mui-v5.toml");

/// Rewrite of a module specifier prefix
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportRule {
    /// Old module; matches itself and every sub-path
    pub from: String,
    /// Replacement for the matched prefix
    pub to: String,
}

/// Rename of a named import
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenameRule {
    /// Module (or parent of sub-paths) the name is imported from
    pub module: String,
    /// Old exported name
    pub from: String,
    /// New exported name
    pub to: String,
}

/// A validated rule table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    name: String,
    #[serde(default)]
    imports: Vec<ImportRule>,
    #[serde(default)]
    renames: Vec<RenameRule>,
}

/// Errors loading a rule table
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Not valid TOML, or wrong shape
    #[error("invalid rule table: {0}")]
    Toml(#[from] toml::de::Error),

    /// A required value is empty
    #[error("empty `{field}` in {section} rule")]
    Empty {
        /// Table section (`imports`, `renames`)
        section: &'static str,
        /// Field name
        field: &'static str,
    },

    /// Module specifier with surrounding whitespace or a trailing slash
    #[error("invalid module specifier `{0}`")]
    InvalidModule(String),

    /// Rename target or source that is not an identifier
    #[error("`{0}` is not an identifier")]
    InvalidIdentifier(String),

    /// Rule that maps a value onto itself
    #[error("{section} rule for `{value}` does not change anything")]
    NoOp {
        /// Table section
        section: &'static str,
        /// The unchanged value
        value: String,
    },

    /// Two rules for the same input
    #[error("duplicate {section} rule for `{key}`")]
    Duplicate {
        /// Table section
        section: &'static str,
        /// The repeated input
        key: String,
    },
}

impl RuleSet {
    /// Parse and validate a TOML rule table
    ///
    /// # Errors
    /// `RuleError::Toml` on malformed input, or the first validation error
    pub fn from_toml(text: &str) -> Result<Self, RuleError> {
        let rules: Self = toml::from_str(text)?;
        rules.validate()?;
        Ok(rules)
    }

    /// The built-in rule table
    ///
    /// # Errors
    /// Only if the embedded table is invalid
    pub fn builtin() -> Result<Self, RuleError> {
        Self::from_toml(BUILTIN_RULES)
    }

    /// Check every rule
    ///
    /// # Errors
    /// The first invalid rule found
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.name.trim().is_empty() {
            return Err(RuleError::Empty {
                section: "rule set",
                field: "name",
            });
        }

        let mut seen = HashSet::new();
        for rule in &self.imports {
            check_module("imports", "from", &rule.from)?;
            check_module("imports", "to", &rule.to)?;
            if rule.from == rule.to {
                return Err(RuleError::NoOp {
                    section: "imports",
                    value: rule.from.clone(),
                });
            }
            if !seen.insert(rule.from.as_str()) {
                return Err(RuleError::Duplicate {
                    section: "imports",
                    key: rule.from.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for rule in &self.renames {
            check_module("renames", "module", &rule.module)?;
            check_identifier("renames", "from", &rule.from)?;
            check_identifier("renames", "to", &rule.to)?;
            if rule.from == rule.to {
                return Err(RuleError::NoOp {
                    section: "renames",
                    value: rule.from.clone(),
                });
            }
            if !seen.insert((rule.module.as_str(), rule.from.as_str())) {
                return Err(RuleError::Duplicate {
                    section: "renames",
                    key: format!("{}#{}", rule.module, rule.from),
                });
            }
        }
        Ok(())
    }

    /// Rule set name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Import rules
    #[inline]
    #[must_use]
    pub fn imports(&self) -> &[ImportRule] {
        &self.imports
    }

    /// Rename rules
    #[inline]
    #[must_use]
    pub fn renames(&self) -> &[RenameRule] {
        &self.renames
    }

    /// New value for a module specifier, if an import rule matches
    ///
    /// The longest matching `from` wins.
    #[must_use]
    pub fn rewrite_specifier(&self, specifier: &str) -> Option<String> {
        self.imports
            .iter()
            .filter(|rule| module_matches(specifier, &rule.from))
            .max_by_key(|rule| rule.from.len())
            .map(|rule| format!("{}{}", rule.to, &specifier[rule.from.len()..]))
    }

    /// Rename rule for `name` imported from `specifier`
    #[must_use]
    pub fn rename_for(&self, specifier: &str, name: &str) -> Option<&RenameRule> {
        self.renames
            .iter()
            .filter(|rule| rule.from == name && module_matches(specifier, &rule.module))
            .max_by_key(|rule| rule.module.len())
    }
}

/// `specifier` is `module` or a sub-path of it
fn module_matches(specifier: &str, module: &str) -> bool {
    specifier
        .strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

fn check_module(section: &'static str, field: &'static str, value: &str) -> Result<(), RuleError> {
    if value.is_empty() {
        return Err(RuleError::Empty { section, field });
    }
    if value.trim() != value || value.ends_with('/') || value.contains(['\'', '"', '`']) {
        return Err(RuleError::InvalidModule(value.to_string()));
    }
    Ok(())
}

fn check_identifier(
    section: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), RuleError> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(RuleError::Empty { section, field });
    };
    let head = first.is_alphabetic() || first == '_' || first == '$';
    if !head || !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
        return Err(RuleError::InvalidIdentifier(value.to_string()));
    }
    Ok(())
}
