//! The architectural advisor.
//!
//! A pure transformation pass over an [`ArchitectureSpec`] that runs between
//! spec generation and component resolution:
//!
//! 1. synthesize entirely-missing dependencies (unless scope-restricted)
//! 2. stably reorder components by architectural layer
//! 3. add pattern-implied edges
//! 4. auto-form layer clusters
//! 5. apply the edge-routing attribute policy and database port pinning
//!
//! The advisor runs for AWS specs only; other providers pass through
//! unchanged. All passes are idempotent: advising an already-advised spec is
//! a no-op.

pub mod clusters;
pub mod dependencies;
pub mod layers;
pub mod patterns;
pub mod routing;

use archflow::{ArchitectureSpec, Provider};

/// Knobs the orchestrator sets per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdviseOptions {
    /// The user restricted the component inventory explicitly; do not
    /// synthesize dependencies.
    pub scope_restricted: bool,
}

/// What one advisory pass did, for logging and the modify-response payload.
#[derive(Debug, Clone, Default)]
pub struct AdviceReport {
    /// Ids of synthesized dependency components
    pub synthesized_components: Vec<String>,

    /// Number of pattern edges added
    pub added_connections: usize,

    /// Ids of auto-formed clusters
    pub formed_clusters: Vec<String>,
}

impl AdviceReport {
    /// Whether the pass changed anything beyond attribute defaults.
    #[must_use]
    pub fn changed_structure(&self) -> bool {
        !self.synthesized_components.is_empty()
            || self.added_connections > 0
            || !self.formed_clusters.is_empty()
    }
}

/// The advisor. Stateless; the struct exists for the seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct Advisor;

impl Advisor {
    #[must_use]
    pub fn new() -> Self {
        Advisor
    }

    /// Run the advisory passes in order, mutating the spec in place.
    pub fn advise(&self, spec: &mut ArchitectureSpec, options: AdviseOptions) -> AdviceReport {
        if spec.provider != Provider::Aws {
            return AdviceReport::default();
        }

        let mut report = AdviceReport::default();

        if !options.scope_restricted {
            report.synthesized_components = dependencies::infer_missing(spec);
        }

        // Stable: same-layer components keep their input order.
        spec.components
            .sort_by_key(|c| layers::layer_of(&c.type_id));

        report.added_connections = patterns::suggest_edges(spec);
        report.formed_clusters = clusters::auto_form(spec);
        routing::apply(spec);

        if report.changed_structure() {
            tracing::info!(
                synthesized = report.synthesized_components.len(),
                edges = report.added_connections,
                clusters = report.formed_clusters.len(),
                "advisor adjusted spec"
            );
        }
        report
    }
}
