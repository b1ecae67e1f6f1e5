//! The symbol index: lazily-populated per-module class caches plus the
//! normalized/fuzzy lookup ladder.
//!
//! Population of a module's cache happens at most once per process: concurrent
//! first callers rendezvous on a per-module `OnceLock` and observe the same
//! set. After population, reads take no locks beyond the shard read of the
//! cache map.

use crate::registry::Registry;
use crate::tables::{self, ModuleSymbols};
use archflow::Provider;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Similarity floor for fuzzy class matching.
pub const FUZZY_THRESHOLD: f64 = 0.60;

/// The cached view of one module: class names in export order plus a
/// normalized-name lookup table.
#[derive(Debug)]
pub struct ClassSet {
    classes: Vec<&'static str>,
    by_normalized: HashMap<String, &'static str>,
}

impl ClassSet {
    fn from_entry(entry: &ModuleSymbols) -> Self {
        let mut by_normalized = HashMap::with_capacity(entry.classes.len());
        for &class in entry.classes {
            // First export wins when an alias normalizes identically.
            by_normalized.entry(normalize(class)).or_insert(class);
        }
        ClassSet {
            classes: entry.classes.to_vec(),
            by_normalized,
        }
    }

    fn empty() -> Self {
        ClassSet {
            classes: Vec::new(),
            by_normalized: HashMap::new(),
        }
    }

    /// Class names in export order.
    #[must_use]
    pub fn classes(&self) -> &[&'static str] {
        &self.classes
    }

    /// Exact (case-insensitive) membership.
    #[must_use]
    pub fn contains_exact(&self, name: &str) -> Option<&'static str> {
        self.classes
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Normalized-equality membership.
    #[must_use]
    pub fn contains_normalized(&self, normalized_query: &str) -> Option<&'static str> {
        self.by_normalized.get(normalized_query).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// A located symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Fully-qualified module
    pub module: &'static str,
    /// Class name inside that module
    pub class: &'static str,
}

/// A fuzzy suggestion with its score, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub module: &'static str,
    pub class: &'static str,
    pub score: f64,
}

/// Normalize a query or class name: drop `-`, `_` and whitespace, lowercase.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Process-wide symbol index over the generated tables.
pub struct SymbolIndex {
    registry: Arc<Registry>,
    cache: DashMap<&'static str, Arc<OnceLock<Arc<ClassSet>>>>,
}

impl SymbolIndex {
    #[must_use]
    pub fn new(registry: Arc<Registry>) -> Self {
        SymbolIndex {
            registry,
            cache: DashMap::new(),
        }
    }

    /// The class set for a module, populating the cache on first use.
    ///
    /// Unknown modules yield an empty set rather than an error; the resolver
    /// treats an empty set as a miss and falls through its cascade.
    #[must_use]
    pub fn classes_in(&self, module: &str) -> Arc<ClassSet> {
        static EMPTY: OnceLock<Arc<ClassSet>> = OnceLock::new();

        let Some(entry) = tables::module_entry(module) else {
            return Arc::clone(EMPTY.get_or_init(|| Arc::new(ClassSet::empty())));
        };

        let cell = self
            .cache
            .entry(entry.module)
            .or_insert_with(|| Arc::new(OnceLock::new()))
            .clone();

        // At-most-once population: losers of the race block here until the
        // winner finishes, then read the same set.
        Arc::clone(cell.get_or_init(|| {
            tracing::debug!(module = entry.module, "populating symbol cache");
            Arc::new(ClassSet::from_entry(entry))
        }))
    }

    /// Look up a free-form type id for a provider.
    ///
    /// The match ladder: exact (case-insensitive) name, normalized equality,
    /// normalized substring, then fuzzy similarity above [`FUZZY_THRESHOLD`]
    /// (ties broken by score, then alphabetically). Each rung scans every
    /// candidate module before the next rung runs, so an exact hit in a later
    /// module beats a fuzzy hit in an earlier one. When a `category_hint` is
    /// given, that category's module is searched before the rest of the
    /// provider's modules.
    #[must_use]
    pub fn find(
        &self,
        provider: Provider,
        type_id: &str,
        category_hint: Option<&str>,
    ) -> Option<Located> {
        let query = type_id.trim();
        if query.is_empty() {
            return None;
        }
        let normalized_query = normalize(query);

        let modules = self.candidate_modules(provider, category_hint);

        for &module in &modules {
            if let Some(class) = self.classes_in(module).contains_exact(query) {
                return Some(Located { module, class });
            }
        }

        for &module in &modules {
            if let Some(class) = self.classes_in(module).contains_normalized(&normalized_query) {
                return Some(Located { module, class });
            }
        }

        if normalized_query.len() >= 3 {
            for &module in &modules {
                let set = self.classes_in(module);
                if let Some(&class) = set
                    .classes()
                    .iter()
                    .find(|c| normalize(c).contains(&normalized_query))
                {
                    return Some(Located { module, class });
                }
            }
        }

        self.best_fuzzy(&modules, &normalized_query)
            .filter(|s| s.score >= FUZZY_THRESHOLD)
            .map(|s| Located {
                module: s.module,
                class: s.class,
            })
    }

    /// Top fuzzy suggestions across the whole provider, for diagnostics.
    #[must_use]
    pub fn suggestions(&self, provider: Provider, type_id: &str, limit: usize) -> Vec<Suggestion> {
        let normalized_query = normalize(type_id);

        let mut scored = Vec::new();
        for entry in tables::provider_modules(provider) {
            let set = self.classes_in(entry.module);
            for &class in set.classes() {
                let score = strsim::normalized_levenshtein(&normalized_query, &normalize(class));
                scored.push(Suggestion {
                    module: entry.module,
                    class,
                    score,
                });
            }
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.class.cmp(b.class))
        });
        scored.truncate(limit);
        scored
    }

    /// Candidate modules for a lookup: the hinted category's module first,
    /// then the provider's remaining modules in catalog order.
    fn candidate_modules(
        &self,
        provider: Provider,
        category_hint: Option<&str>,
    ) -> Vec<&'static str> {
        let mut modules: Vec<&'static str> = Vec::new();
        if let Some(hint) = category_hint {
            if let Some(hinted) = self.registry.module_for(provider, hint) {
                if let Some(entry) = tables::module_entry(hinted) {
                    modules.push(entry.module);
                }
            }
        }
        for entry in tables::provider_modules(provider) {
            if !modules.contains(&entry.module) {
                modules.push(entry.module);
            }
        }
        modules
    }

    fn best_fuzzy(&self, modules: &[&'static str], normalized_query: &str) -> Option<Suggestion> {
        let mut best: Option<Suggestion> = None;
        for &module in modules {
            let set = self.classes_in(module);
            for &class in set.classes() {
                let score = strsim::normalized_levenshtein(normalized_query, &normalize(class));
                let better = match &best {
                    None => true,
                    Some(b) => score > b.score || (score == b.score && class < b.class),
                };
                if better {
                    best = Some(Suggestion {
                        module,
                        class,
                        score,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn index() -> SymbolIndex {
        SymbolIndex::new(Arc::new(Registry::load_builtin().unwrap()))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("load-balancer"), "loadbalancer");
        assert_eq!(normalize("Public_Subnet"), "publicsubnet");
        assert_eq!(normalize("  API Gateway "), "apigateway");
    }

    #[test]
    fn test_exact_lookup() {
        let idx = index();
        let hit = idx.find(Provider::Aws, "Lambda", None).unwrap();
        assert_eq!(hit.module, "diagrams.aws.compute");
        assert_eq!(hit.class, "Lambda");
    }

    #[test]
    fn test_exact_lookup_is_case_insensitive() {
        let idx = index();
        let hit = idx.find(Provider::Aws, "lambda", None).unwrap();
        assert_eq!(hit.class, "Lambda");
    }

    #[test]
    fn test_normalized_lookup_strips_separators() {
        let idx = index();
        let hit = idx.find(Provider::Aws, "public-subnet", None).unwrap();
        assert_eq!(hit.module, "diagrams.aws.network");
        assert_eq!(hit.class, "PublicSubnet");
    }

    #[test]
    fn test_substring_lookup() {
        let idx = index();
        let hit = idx.find(Provider::Aws, "kinesis", Some("analytics")).unwrap();
        assert_eq!(hit.module, "diagrams.aws.analytics");
        assert_eq!(hit.class, "Kinesis");
    }

    #[test]
    fn test_category_hint_searched_first() {
        // "AutoScaling" exists in both compute and management; the hint picks
        // which module wins.
        let idx = index();
        let hit = idx
            .find(Provider::Aws, "autoscaling", Some("management"))
            .unwrap();
        assert_eq!(hit.module, "diagrams.aws.management");

        let hit = idx
            .find(Provider::Aws, "autoscaling", Some("compute"))
            .unwrap();
        assert_eq!(hit.module, "diagrams.aws.compute");
    }

    #[test]
    fn test_fuzzy_lookup_above_threshold() {
        let idx = index();
        // One insertion away from "Dynamodb".
        let hit = idx.find(Provider::Aws, "dynamodbb", None).unwrap();
        assert_eq!(hit.class, "Dynamodb");
    }

    #[test]
    fn test_miss_returns_none() {
        let idx = index();
        assert!(idx.find(Provider::Aws, "zzqqxx", None).is_none());
        assert!(idx.find(Provider::Aws, "", None).is_none());
        assert!(idx.find(Provider::Aws, "   ", None).is_none());
    }

    #[test]
    fn test_reexported_alias_is_found() {
        let idx = index();
        let hit = idx.find(Provider::Aws, "ECS", None).unwrap();
        assert_eq!(hit.class, "ECS");
        let hit = idx
            .find(Provider::Aws, "ElasticContainerService", None)
            .unwrap();
        assert_eq!(hit.class, "ElasticContainerService");
    }

    #[test]
    fn test_suggestions_ranked_and_bounded() {
        let idx = index();
        let suggestions = idx.suggestions(Provider::Aws, "lamda", 5);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].class, "Lambda");
        assert!(suggestions.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_unknown_module_yields_empty_set() {
        let idx = index();
        assert!(idx.classes_in("diagrams.aws.quantum").is_empty());
    }

    #[test]
    fn test_classes_in_includes_every_table_symbol() {
        let idx = index();
        for entry in tables::provider_modules(Provider::Aws) {
            let set = idx.classes_in(entry.module);
            for class in entry.classes {
                assert!(set.contains_exact(class).is_some());
            }
        }
    }

    #[test]
    fn test_concurrent_first_population_is_consistent() {
        let idx = Arc::new(index());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let idx = Arc::clone(&idx);
            handles.push(std::thread::spawn(move || {
                idx.classes_in("diagrams.aws.compute").classes().len()
            }));
        }
        let lens: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(lens.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_azure_and_gcp_lookups() {
        let idx = index();
        let hit = idx.find(Provider::Azure, "cosmosdb", None).unwrap();
        assert_eq!(hit.module, "diagrams.azure.database");
        assert_eq!(hit.class, "CosmosDb");

        let hit = idx.find(Provider::Gcp, "bigquery", None).unwrap();
        assert_eq!(hit.module, "diagrams.gcp.analytics");
    }
}
