//! The symbol registry: a declarative, provider-scoped catalog loaded once at
//! startup.
//!
//! The registry routes categories to renderer modules, maps type ids to
//! `(category, class)` pairs and carries the tag index used for keyword
//! matching. It is a hint source, not a source of truth: a mapping that points
//! at a class the symbol table does not expose must not prevent resolution.

use archflow::Provider;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Embedded catalog document.
const BUILTIN_CATALOG: &str = include_str!("data/registry.yaml");

/// Registry loading failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The catalog document failed to parse
    #[error("malformed registry catalog: {0}")]
    Malformed(#[from] serde_yml::Error),

    /// A type mapping references a category with no module route
    #[error("registry inconsistency: type {type_id:?} references unknown category {category:?}")]
    UnknownCategory {
        /// Offending type id
        type_id: String,
        /// Category with no `categories:` entry
        category: String,
    },
}

/// A type-id mapping: where the registry believes a symbol lives.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeMapping {
    /// Category key into the provider's module routes
    pub category: String,

    /// Class name the registry expects in that module
    pub class: String,

    /// Keywords for overlap matching
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawProviderCatalog {
    categories: BTreeMap<String, String>,
    #[serde(default)]
    ambiguous: Vec<String>,
    types: BTreeMap<String, TypeMapping>,
}

#[derive(Debug)]
struct ProviderCatalog {
    categories: BTreeMap<String, String>,
    ambiguous: HashSet<String>,
    types: BTreeMap<String, TypeMapping>,
}

/// Provider-scoped symbol catalog.
#[derive(Debug)]
pub struct Registry {
    providers: BTreeMap<Provider, ProviderCatalog>,
}

impl Registry {
    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Malformed`] on YAML errors,
    /// [`RegistryError::UnknownCategory`] when a type mapping references a
    /// category with no module route.
    pub fn from_yaml_str(document: &str) -> Result<Registry, RegistryError> {
        let raw: BTreeMap<String, RawProviderCatalog> = serde_yml::from_str(document)?;

        let mut providers = BTreeMap::new();
        for (name, catalog) in raw {
            let Ok(provider) = name.parse::<Provider>() else {
                tracing::warn!(provider = %name, "skipping unknown provider in catalog");
                continue;
            };

            for (type_id, mapping) in &catalog.types {
                if !catalog.categories.contains_key(&mapping.category) {
                    return Err(RegistryError::UnknownCategory {
                        type_id: type_id.clone(),
                        category: mapping.category.clone(),
                    });
                }
            }

            providers.insert(
                provider,
                ProviderCatalog {
                    categories: catalog.categories,
                    ambiguous: catalog.ambiguous.into_iter().collect(),
                    types: catalog.types,
                },
            );
        }

        Ok(Registry { providers })
    }

    /// Load the embedded catalog.
    ///
    /// # Errors
    ///
    /// Only when the embedded document is inconsistent, which the test suite
    /// guards against.
    pub fn load_builtin() -> Result<Registry, RegistryError> {
        Registry::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Module route for `(provider, category)`.
    #[must_use]
    pub fn module_for(&self, provider: Provider, category: &str) -> Option<&str> {
        self.providers
            .get(&provider)?
            .categories
            .get(category)
            .map(String::as_str)
    }

    /// The registry's idea of where `type_id` lives. May be missing or stale.
    #[must_use]
    pub fn mapping(&self, provider: Provider, type_id: &str) -> Option<&TypeMapping> {
        self.providers.get(&provider)?.types.get(type_id)
    }

    /// All known type ids for a provider, in catalog order.
    #[must_use]
    pub fn all_type_ids(&self, provider: Provider) -> Vec<&str> {
        self.providers
            .get(&provider)
            .map(|c| c.types.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether a type id needs contextual disambiguation.
    #[must_use]
    pub fn is_ambiguous(&self, provider: Provider, type_id: &str) -> bool {
        self.providers
            .get(&provider)
            .is_some_and(|c| c.ambiguous.contains(type_id))
    }

    /// Iterate `(type_id, mapping)` pairs for keyword matching.
    pub fn type_mappings(&self, provider: Provider) -> impl Iterator<Item = (&str, &TypeMapping)> {
        self.providers
            .get(&provider)
            .into_iter()
            .flat_map(|c| c.types.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Category keys for a provider, in catalog order.
    #[must_use]
    pub fn categories(&self, provider: Provider) -> Vec<&str> {
        self.providers
            .get(&provider)
            .map(|c| c.categories.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tables;

    #[test]
    fn test_builtin_catalog_parses() {
        let registry = Registry::load_builtin().unwrap();
        for provider in Provider::ALL {
            assert!(
                !registry.all_type_ids(provider).is_empty(),
                "no types for {provider}"
            );
        }
    }

    #[test]
    fn test_builtin_categories_route_to_known_modules() {
        let registry = Registry::load_builtin().unwrap();
        for provider in Provider::ALL {
            for category in registry.categories(provider) {
                let module = registry.module_for(provider, category).unwrap();
                assert!(
                    tables::module_entry(module).is_some(),
                    "{provider}/{category} routes to unknown module {module}"
                );
            }
        }
    }

    #[test]
    fn test_builtin_mappings_resolve_against_tables() {
        // Every class the catalog claims must exist in the generated tables.
        // If the icon library drops a symbol, this test is the early warning.
        let registry = Registry::load_builtin().unwrap();
        for provider in Provider::ALL {
            for (type_id, mapping) in registry.type_mappings(provider) {
                let module = registry.module_for(provider, &mapping.category).unwrap();
                assert!(
                    tables::module_exports(module, &mapping.class),
                    "{provider}/{type_id}: {module} does not export {}",
                    mapping.class
                );
            }
        }
    }

    #[test]
    fn test_known_aws_mappings() {
        let registry = Registry::load_builtin().unwrap();
        let lambda = registry.mapping(Provider::Aws, "lambda").unwrap();
        assert_eq!(lambda.category, "compute");
        assert_eq!(lambda.class, "Lambda");

        let dynamo = registry.mapping(Provider::Aws, "dynamodb").unwrap();
        assert_eq!(dynamo.category, "database");
        assert_eq!(dynamo.class, "Dynamodb");
    }

    #[test]
    fn test_ambiguous_set() {
        let registry = Registry::load_builtin().unwrap();
        assert!(registry.is_ambiguous(Provider::Aws, "subnet"));
        assert!(registry.is_ambiguous(Provider::Aws, "database"));
        assert!(!registry.is_ambiguous(Provider::Aws, "lambda"));
    }

    #[test]
    fn test_missing_mapping_is_none() {
        let registry = Registry::load_builtin().unwrap();
        assert!(registry.mapping(Provider::Aws, "mainframe").is_none());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let doc = r"
aws:
  categories:
    compute: diagrams.aws.compute
  types:
    widget:
      category: widgets
      class: Widget
";
        let err = Registry::from_yaml_str(doc).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownCategory { .. }));
    }

    #[test]
    fn test_unknown_provider_section_skipped() {
        let doc = r"
oracle:
  categories:
    compute: diagrams.oracle.compute
  types: {}
aws:
  categories:
    compute: diagrams.aws.compute
  types:
    ec2:
      category: compute
      class: EC2
";
        let registry = Registry::from_yaml_str(doc).unwrap();
        assert_eq!(registry.all_type_ids(Provider::Aws), vec!["ec2"]);
    }
}
