//! Contextual disambiguation of ambiguous type ids.
//!
//! A component typed `subnet` named "Public Subnet" should resolve to
//! `public_subnet`. The mapping is closed and data-driven: rules live in
//! `data/context_patterns.yaml`, keyed by ambiguous type id, and match on the
//! lowercased tokens of the component's display name.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::collections::HashSet;
use thiserror::Error;

const BUILTIN_PATTERNS: &str = include_str!("data/context_patterns.yaml");

/// Context table loading failures.
#[derive(Debug, Error)]
#[error("malformed context pattern table: {0}")]
pub struct ContextTableError(#[from] serde_yml::Error);

#[derive(Debug, Clone, Deserialize)]
struct ContextRule {
    tokens: Vec<String>,
    resolve_to: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ContextEntry {
    default: String,
    #[serde(default)]
    rules: Vec<ContextRule>,
}

/// The loaded disambiguation table.
#[derive(Debug)]
pub struct ContextTable {
    entries: BTreeMap<String, ContextEntry>,
}

impl ContextTable {
    /// Parse a pattern document.
    ///
    /// # Errors
    ///
    /// On YAML shape errors.
    pub fn from_yaml_str(document: &str) -> Result<ContextTable, ContextTableError> {
        let entries: BTreeMap<String, ContextEntry> = serde_yml::from_str(document)?;
        Ok(ContextTable { entries })
    }

    /// Load the embedded table.
    ///
    /// # Errors
    ///
    /// Only when the embedded document is malformed, which the test suite
    /// guards against.
    pub fn load_builtin() -> Result<ContextTable, ContextTableError> {
        ContextTable::from_yaml_str(BUILTIN_PATTERNS)
    }

    /// Whether the table has an entry for this type id.
    #[must_use]
    pub fn knows(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }

    /// Disambiguate `type_id` using the component's display name.
    ///
    /// Returns the remapped type id, or `None` when the table has no entry
    /// for `type_id`. Rules are evaluated in table order; the first rule
    /// whose token set intersects the name tokens wins, otherwise the
    /// entry's default applies.
    #[must_use]
    pub fn disambiguate(&self, type_id: &str, component_name: &str) -> Option<&str> {
        let entry = self.entries.get(type_id)?;
        let name_tokens = tokenize(component_name);

        for rule in &entry.rules {
            if rule.tokens.iter().any(|t| name_tokens.contains(t.as_str())) {
                return Some(&rule.resolve_to);
            }
        }
        Some(&entry.default)
    }
}

/// Lowercased alphanumeric tokens of a display name.
#[must_use]
pub fn tokenize(name: &str) -> HashSet<String> {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}
