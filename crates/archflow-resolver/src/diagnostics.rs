//! Structured diagnostics for resolution failures.
//!
//! Resolution failures are the most user-actionable error class the service
//! produces, so the payload carries everything needed to fix the request:
//! fuzzy near-misses, what the hinted module actually exports, and whether
//! the catalog looks stale.

use archflow::Provider;
use serde::Serialize;
use thiserror::Error;

/// A fuzzy near-miss offered to the user.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionInfo {
    /// Candidate class name
    pub class: String,
    /// Module exporting it
    pub module: String,
    /// Similarity score in `[0, 1]`
    pub score: f64,
}

/// What one module actually exports, for the error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleListing {
    /// Category the module is routed under
    pub category: String,
    /// Fully-qualified module
    pub module: String,
    /// Exported class names, in export order
    pub classes: Vec<String>,
}

/// The full diagnostic payload for one unresolved component.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionDiagnostic {
    /// Provider the lookup ran against
    pub provider: Provider,

    /// The type id as requested
    pub type_id: String,

    /// Top fuzzy candidates across the provider's index
    pub suggestions: Vec<SuggestionInfo>,

    /// Listing of the hinted module's classes, when a category hint existed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<ModuleListing>,

    /// Set when the catalog references a class the installed symbol tables do
    /// not expose; usually means the icon library version is outdated
    pub stale_catalog: bool,
}

/// Component resolution failure.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolverError {
    /// No cascade stage produced a symbol for this component.
    #[error(
        "could not resolve component {component_id:?}: no symbol found for type {:?} (provider {})",
        diagnostic.type_id,
        diagnostic.provider
    )]
    Unresolved {
        /// Component that failed to resolve
        component_id: String,
        /// Structured payload for the error response
        diagnostic: Box<ResolutionDiagnostic>,
    },
}

impl ResolverError {
    /// The diagnostic payload, regardless of variant.
    #[must_use]
    pub fn diagnostic(&self) -> &ResolutionDiagnostic {
        match self {
            ResolverError::Unresolved { diagnostic, .. } => diagnostic,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_component_and_type() {
        let err = ResolverError::Unresolved {
            component_id: "db1".to_string(),
            diagnostic: Box::new(ResolutionDiagnostic {
                provider: Provider::Aws,
                type_id: "mainframe".to_string(),
                suggestions: vec![],
                available: None,
                stale_catalog: false,
            }),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("db1"));
        assert!(rendered.contains("mainframe"));
        assert!(rendered.contains("aws"));
    }

    #[test]
    fn test_diagnostic_serializes_without_empty_listing() {
        let diagnostic = ResolutionDiagnostic {
            provider: Provider::Aws,
            type_id: "mainframe".to_string(),
            suggestions: vec![SuggestionInfo {
                class: "EC2".to_string(),
                module: "diagrams.aws.compute".to_string(),
                score: 0.4,
            }],
            available: None,
            stale_catalog: true,
        };
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["stale_catalog"], true);
        assert!(json.get("available").is_none());
        assert_eq!(json["suggestions"][0]["class"], "EC2");
    }
}
