//! The four-stage resolution cascade.
//!
//! Stage 1 asks the symbol index directly, hinted by the registry. Stage 2
//! rewrites ambiguous or unmatched type ids using display-name context, fuzzy
//! similarity against known type ids and tag overlap, then retries Stage 1.
//! Stage 3 trusts the registry mapping and consults the generated tables
//! directly. Stage 4 builds the diagnostic failure. There is no silent
//! substitution: either a concrete symbol comes back or the request fails.

use crate::context::{tokenize, ContextTable};
use crate::diagnostics::{ModuleListing, ResolutionDiagnostic, ResolverError, SuggestionInfo};
use archflow::{ArchitectureSpec, Component, Provider};
use archflow_symbols::index::{normalize, SymbolIndex, FUZZY_THRESHOLD};
use archflow_symbols::registry::Registry;
use archflow_symbols::tables;
use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// How many fuzzy suggestions a failure payload carries.
const SUGGESTION_LIMIT: usize = 5;

/// Which cascade stage produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 1: symbol index lookup
    Library,
    /// Stage 2: contextual/fuzzy/keyword rewrite, then index lookup
    Contextual,
    /// Stage 3: registry mapping consulted against the generated tables
    Registry,
}

/// A resolved component symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Renderer module exporting the symbol
    pub module: &'static str,

    /// Concrete class name
    pub class: &'static str,

    /// Type id after any contextual rewrite (equals the input when none ran)
    pub type_id: String,

    /// Stage that produced the hit
    pub stage: Stage,
}

type MemoKey = (Provider, String, String);

/// The component resolver.
///
/// Cheap to share: all lookups go through `Arc`ed catalog state, and results
/// are memoized per `(provider, type, name)`. The installed symbol tables
/// never change during process lifetime, so the memo needs no invalidation.
pub struct Resolver {
    registry: Arc<Registry>,
    index: Arc<SymbolIndex>,
    context: ContextTable,
    memo: DashMap<MemoKey, Resolution>,
}

impl Resolver {
    #[must_use]
    pub fn new(registry: Arc<Registry>, index: Arc<SymbolIndex>, context: ContextTable) -> Self {
        Resolver {
            registry,
            index,
            context,
            memo: DashMap::new(),
        }
    }

    /// Resolve one component against an effective provider.
    ///
    /// # Errors
    ///
    /// [`ResolverError::Unresolved`] with a full diagnostic when no stage
    /// produces a symbol.
    pub fn resolve(
        &self,
        component: &Component,
        spec_provider: Provider,
    ) -> Result<Resolution, ResolverError> {
        let provider = component.effective_provider(spec_provider);
        let type_id = component.type_id.trim();

        let memo_key = (
            provider,
            normalize(type_id),
            component.name.trim().to_lowercase(),
        );
        if let Some(hit) = self.memo.get(&memo_key) {
            return Ok(hit.clone());
        }

        let resolution = self.resolve_uncached(component, provider, type_id)?;
        self.memo.insert(memo_key, resolution.clone());
        Ok(resolution)
    }

    /// Resolve every component of a spec, keyed by component id.
    ///
    /// # Errors
    ///
    /// Fails on the first unresolvable component; resolution failure is fatal
    /// for the whole request.
    pub fn resolve_spec(
        &self,
        spec: &ArchitectureSpec,
    ) -> Result<BTreeMap<String, Resolution>, ResolverError> {
        let mut resolutions = BTreeMap::new();
        for component in &spec.components {
            let resolution = self.resolve(component, spec.provider)?;
            resolutions.insert(component.id.clone(), resolution);
        }
        Ok(resolutions)
    }

    fn resolve_uncached(
        &self,
        component: &Component,
        provider: Provider,
        type_id: &str,
    ) -> Result<Resolution, ResolverError> {
        // Stage 1: library-first discovery.
        let ambiguous = self.registry.is_ambiguous(provider, type_id);
        if !ambiguous {
            if let Some(resolution) = self.library_lookup(provider, type_id, Stage::Library) {
                return Ok(resolution);
            }
        }

        // Stage 2: contextual rewrite, then retry Stage 1.
        if let Some(resolution) = self.contextual_lookup(component, provider, type_id) {
            return Ok(resolution);
        }

        // An ambiguous id whose context produced nothing still deserves the
        // plain library attempt before the registry fallback.
        if ambiguous {
            if let Some(resolution) = self.library_lookup(provider, type_id, Stage::Library) {
                return Ok(resolution);
            }
        }

        // Stage 3: trust the registry mapping against the generated tables.
        if let Some(resolution) = self.registry_fallback(provider, type_id) {
            return Ok(resolution);
        }

        // Stage 4: diagnostic failure.
        Err(self.unresolved(component, provider, type_id))
    }

    /// Stage 1. The registry's category for the type id, when it has one,
    /// narrows the first module searched.
    fn library_lookup(&self, provider: Provider, type_id: &str, stage: Stage) -> Option<Resolution> {
        let hint = self
            .registry
            .mapping(provider, type_id)
            .map(|m| m.category.as_str());
        let located = self.index.find(provider, type_id, hint)?;
        Some(Resolution {
            module: located.module,
            class: located.class,
            type_id: type_id.to_string(),
            stage,
        })
    }

    /// Stage 2: display-name context, fuzzy type-id similarity, tag overlap.
    /// Each rewrite candidate is resubmitted to the Stage 1 lookup.
    fn contextual_lookup(
        &self,
        component: &Component,
        provider: Provider,
        type_id: &str,
    ) -> Option<Resolution> {
        // 2a: closed context-pattern table keyed by ambiguous type id.
        if let Some(candidate) = self.context.disambiguate(type_id, &component.name) {
            if self.registry.mapping(provider, candidate).is_some() {
                if let Some(resolution) =
                    self.library_lookup(provider, candidate, Stage::Contextual)
                {
                    tracing::debug!(
                        component = %component.id,
                        from = type_id,
                        to = candidate,
                        "contextual rewrite"
                    );
                    return Some(resolution);
                }
            }
        }

        // 2b: fuzzy similarity against every known type id.
        if let Some(candidate) = self.fuzzy_type_id(provider, type_id) {
            if let Some(resolution) = self.library_lookup(provider, &candidate, Stage::Contextual) {
                tracing::debug!(
                    component = %component.id,
                    from = type_id,
                    to = %candidate,
                    "fuzzy type-id rewrite"
                );
                return Some(resolution);
            }
        }

        // 2c: keyword overlap between the component's words and the tag index.
        if let Some(candidate) = self.keyword_overlap(component, provider, type_id) {
            if let Some(resolution) = self.library_lookup(provider, &candidate, Stage::Contextual) {
                tracing::debug!(
                    component = %component.id,
                    from = type_id,
                    to = %candidate,
                    "keyword rewrite"
                );
                return Some(resolution);
            }
        }

        None
    }

    fn fuzzy_type_id(&self, provider: Provider, type_id: &str) -> Option<String> {
        let normalized = normalize(type_id);
        let mut best: Option<(f64, &str)> = None;
        for candidate in self.registry.all_type_ids(provider) {
            if normalize(candidate) == normalized {
                continue; // identical id would just repeat Stage 1
            }
            let score = strsim::normalized_levenshtein(&normalized, &normalize(candidate));
            let better = match best {
                None => true,
                Some((b, prev)) => score > b || (score == b && candidate < prev),
            };
            if better {
                best = Some((score, candidate));
            }
        }
        best.filter(|(score, _)| *score >= FUZZY_THRESHOLD)
            .map(|(_, candidate)| candidate.to_string())
    }

    fn keyword_overlap(
        &self,
        component: &Component,
        provider: Provider,
        type_id: &str,
    ) -> Option<String> {
        let mut words = tokenize(&component.name);
        words.extend(tokenize(type_id));

        let mut best: Option<(usize, &str)> = None;
        for (candidate, mapping) in self.registry.type_mappings(provider) {
            let overlap = mapping
                .tags
                .iter()
                .filter(|tag| words.contains(tag.as_str()))
                .count();
            if overlap == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((b, prev)) => overlap > b || (overlap == b && candidate < prev),
            };
            if better {
                best = Some((overlap, candidate));
            }
        }
        best.map(|(_, candidate)| candidate.to_string())
    }

    /// Stage 3. The registry mapping is a hint; the generated tables decide.
    fn registry_fallback(&self, provider: Provider, type_id: &str) -> Option<Resolution> {
        let mapping = self.registry.mapping(provider, type_id)?;
        let module = self.registry.module_for(provider, &mapping.category)?;

        // Check the index cache first, then consult the tables directly by
        // exact name. The direct consultation succeeds even when the cached
        // view or the catalog's idea of the module has gone stale.
        let located = self
            .index
            .classes_in(module)
            .contains_exact(&mapping.class)
            .or_else(|| {
                if tables::module_exports(module, &mapping.class) {
                    tables::module_entry(module)?
                        .classes
                        .iter()
                        .find(|c| **c == mapping.class)
                        .copied()
                } else {
                    None
                }
            })?;

        let module_static = tables::module_entry(module)?.module;
        tracing::info!(
            provider = %provider,
            type_id,
            module,
            class = located,
            "resolved through registry fallback"
        );
        Some(Resolution {
            module: module_static,
            class: located,
            type_id: type_id.to_string(),
            stage: Stage::Registry,
        })
    }

    /// Stage 4.
    fn unresolved(
        &self,
        component: &Component,
        provider: Provider,
        type_id: &str,
    ) -> ResolverError {
        let suggestions = self
            .index
            .suggestions(provider, type_id, SUGGESTION_LIMIT)
            .into_iter()
            .map(|s| SuggestionInfo {
                class: s.class.to_string(),
                module: s.module.to_string(),
                score: (s.score * 100.0).round() / 100.0,
            })
            .collect();

        let mapping = self.registry.mapping(provider, type_id);
        let available = mapping.and_then(|m| {
            let module = self.registry.module_for(provider, &m.category)?;
            let classes = self
                .index
                .classes_in(module)
                .classes()
                .iter()
                .map(|c| (*c).to_string())
                .collect();
            Some(ModuleListing {
                category: m.category.clone(),
                module: module.to_string(),
                classes,
            })
        });

        // A mapping that survived to Stage 4 references a class the tables do
        // not expose: flag the catalog/library version skew.
        let stale_catalog = mapping.is_some();

        ResolverError::Unresolved {
            component_id: component.id.clone(),
            diagnostic: Box::new(ResolutionDiagnostic {
                provider,
                type_id: type_id.to_string(),
                suggestions,
                available,
                stale_catalog,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use archflow::spec::{Direction, GraphvizAttrs, OutFormats};

    fn resolver() -> Resolver {
        let registry = Arc::new(Registry::load_builtin().unwrap());
        let index = Arc::new(SymbolIndex::new(Arc::clone(&registry)));
        Resolver::new(registry, index, ContextTable::load_builtin().unwrap())
    }

    fn component(id: &str, name: &str, type_id: &str) -> Component {
        Component::new(id, name, type_id)
    }

    #[test]
    fn test_exact_resolution() {
        let r = resolver();
        let hit = r
            .resolve(&component("fn", "Handler", "lambda"), Provider::Aws)
            .unwrap();
        assert_eq!(hit.module, "diagrams.aws.compute");
        assert_eq!(hit.class, "Lambda");
        assert_eq!(hit.stage, Stage::Library);

        let hit = r
            .resolve(&component("db", "Sessions", "dynamodb"), Provider::Aws)
            .unwrap();
        assert_eq!(hit.module, "diagrams.aws.database");
        assert_eq!(hit.class, "Dynamodb");
    }

    #[test]
    fn test_ambiguous_subnet_by_context() {
        let r = resolver();

        let public = r
            .resolve(&component("s1", "Public Subnet", "subnet"), Provider::Aws)
            .unwrap();
        assert_eq!(public.class, "PublicSubnet");
        assert_eq!(public.type_id, "public_subnet");
        assert_eq!(public.stage, Stage::Contextual);

        let private = r
            .resolve(&component("s2", "Private Subnet", "subnet"), Provider::Aws)
            .unwrap();
        assert_eq!(private.class, "PrivateSubnet");
        assert_eq!(private.type_id, "private_subnet");
    }

    #[test]
    fn test_ambiguous_database_by_context() {
        let r = resolver();
        let relational = r
            .resolve(
                &component("db1", "Postgres order database", "database"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(relational.class, "RDS");

        let nosql = r
            .resolve(
                &component("db2", "NoSQL session database", "database"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(nosql.class, "Dynamodb");
    }

    #[test]
    fn test_ambiguous_function_by_context() {
        let r = resolver();
        let serverless = r
            .resolve(
                &component("f1", "Serverless image resizer", "function"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(serverless.class, "Lambda");

        let containerized = r
            .resolve(
                &component("f2", "Fargate batch worker", "function"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(containerized.class, "ECS");

        let k8s = r
            .resolve(
                &component("f3", "Kubernetes cron job", "function"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(k8s.class, "EKS");
    }

    #[test]
    fn test_misspelled_type_resolves_through_index_fuzzy() {
        let r = resolver();
        let hit = r
            .resolve(&component("f", "Worker", "lambada"), Provider::Aws)
            .unwrap();
        assert_eq!(hit.class, "Lambda");
        assert_eq!(hit.stage, Stage::Library);
    }

    #[test]
    fn test_fuzzy_type_id_rewrite() {
        // "kafkka" is too far from any class name for the index ladder, but
        // one edit away from the type id "kafka", whose class name shares no
        // prefix with it.
        let r = resolver();
        let hit = r
            .resolve(&component("bus", "Event log", "kafkka"), Provider::Aws)
            .unwrap();
        assert_eq!(hit.class, "ManagedStreamingForKafka");
        assert_eq!(hit.stage, Stage::Contextual);
        assert_eq!(hit.type_id, "kafka");
    }

    #[test]
    fn test_keyword_overlap_rewrite() {
        let r = resolver();
        // "delivery-network" matches no class or type id, but the component's
        // words overlap the cloudfront tag set.
        let hit = r
            .resolve(
                &component("edge", "cdn edge distribution", "delivery-network"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(hit.class, "CloudFront");
        assert_eq!(hit.stage, Stage::Contextual);
        assert_eq!(hit.type_id, "cloudfront");
    }

    #[test]
    fn test_registry_fallback_by_exact_class() {
        // A catalog entry whose type id shares nothing with its class name:
        // Stage 1 and 2 miss, Stage 3 consults the tables directly.
        let doc = r"
aws:
  categories:
    ml: diagrams.aws.ml
  types:
    foundation_runtime:
      category: ml
      class: Bedrock
";
        let registry = Arc::new(Registry::from_yaml_str(doc).unwrap());
        let index = Arc::new(SymbolIndex::new(Arc::clone(&registry)));
        let r = Resolver::new(registry, index, ContextTable::load_builtin().unwrap());

        let hit = r
            .resolve(
                &component("llm", "Model host", "foundation_runtime"),
                Provider::Aws,
            )
            .unwrap();
        assert_eq!(hit.module, "diagrams.aws.ml");
        assert_eq!(hit.class, "Bedrock");
        assert_eq!(hit.stage, Stage::Registry);
    }

    #[test]
    fn test_unresolved_carries_diagnostics() {
        let r = resolver();
        let err = r
            .resolve(&component("x", "Mystery", "zzqqxx"), Provider::Aws)
            .unwrap_err();
        let diagnostic = err.diagnostic();
        assert_eq!(diagnostic.type_id, "zzqqxx");
        assert_eq!(diagnostic.suggestions.len(), 5);
        assert!(!diagnostic.stale_catalog);
    }

    #[test]
    fn test_stale_catalog_flagged() {
        // Mapping references a class the tables do not expose at all.
        let doc = r"
aws:
  categories:
    compute: diagrams.aws.compute
  types:
    zzqqxx:
      category: compute
      class: WarpDrive
";
        let registry = Arc::new(Registry::from_yaml_str(doc).unwrap());
        let index = Arc::new(SymbolIndex::new(Arc::clone(&registry)));
        let r = Resolver::new(registry, index, ContextTable::load_builtin().unwrap());

        let err = r
            .resolve(&component("x", "Mystery", "zzqqxx"), Provider::Aws)
            .unwrap_err();
        let diagnostic = err.diagnostic();
        assert!(diagnostic.stale_catalog);
        let available = diagnostic.available.as_ref().unwrap();
        assert_eq!(available.category, "compute");
        assert!(available.classes.iter().any(|c| c == "EC2"));
    }

    #[test]
    fn test_memoization_is_stable() {
        let r = resolver();
        let c = component("fn", "Handler", "lambda");
        let first = r.resolve(&c, Provider::Aws).unwrap();
        let second = r.resolve(&c, Provider::Aws).unwrap();
        assert_eq!(first, second);
        assert_eq!(r.memo.len(), 1);
    }

    #[test]
    fn test_component_provider_override() {
        let r = resolver();
        let mut c = component("db", "Cosmos store", "cosmosdb");
        c.provider = Some(Provider::Azure);
        let hit = r.resolve(&c, Provider::Aws).unwrap();
        assert_eq!(hit.module, "diagrams.azure.database");
        assert_eq!(hit.class, "CosmosDb");
    }

    #[test]
    fn test_resolve_spec_fails_fast() {
        let r = resolver();
        let spec = ArchitectureSpec {
            title: "t".to_string(),
            provider: Provider::Aws,
            direction: Direction::LR,
            out_formats: OutFormats::default(),
            components: vec![
                component("ok", "Handler", "lambda"),
                component("bad", "Mystery", "zzqqxx"),
            ],
            connections: vec![],
            clusters: vec![],
            graphviz_attrs: GraphvizAttrs::default(),
        };
        assert!(r.resolve_spec(&spec).is_err());
    }

    #[test]
    fn test_resolve_spec_keys_by_component_id() {
        let r = resolver();
        let spec = ArchitectureSpec {
            title: "t".to_string(),
            provider: Provider::Aws,
            direction: Direction::LR,
            out_formats: OutFormats::default(),
            components: vec![
                component("api", "Gateway", "apigateway"),
                component("fn", "Handler", "lambda"),
            ],
            connections: vec![],
            clusters: vec![],
            graphviz_attrs: GraphvizAttrs::default(),
        };
        let resolutions = r.resolve_spec(&spec).unwrap();
        assert_eq!(resolutions["api"].class, "APIGateway");
        assert_eq!(resolutions["fn"].class, "Lambda");
    }
}
