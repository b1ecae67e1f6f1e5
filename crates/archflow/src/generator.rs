//! The spec-generator seam.
//!
//! The orchestrator never talks to an LLM provider directly; it talks to a
//! [`SpecGenerator`]. `archflow-anthropic` provides the production
//! implementation; tests substitute a canned one.

use crate::error::Result;
use crate::spec::{ArchitectureSpec, Direction, OutFormats, Provider};
use async_trait::async_trait;

/// Inputs for producing a fresh spec from a natural-language description.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The user's architecture description
    pub description: String,

    /// Provider the spec should target
    pub provider: Provider,

    /// Requested artifact format(s)
    pub out_formats: OutFormats,

    /// Rank direction the orchestrator will enforce on the result
    pub direction: Direction,
}

/// A freshly generated spec.
#[derive(Debug, Clone)]
pub struct GeneratedSpec {
    /// The structured spec, already parsed but not yet validated
    pub spec: ArchitectureSpec,
}

/// A spec rewritten according to a modification instruction.
#[derive(Debug, Clone)]
pub struct ModifiedSpec {
    /// The rewritten spec
    pub spec: ArchitectureSpec,

    /// Human-readable summaries of what changed
    pub changes: Vec<String>,
}

/// Produces and rewrites architecture specs from natural language.
///
/// Implementations must be cancellation-safe: the orchestrator wraps calls in
/// a timeout and may drop the future at any await point.
#[async_trait]
pub trait SpecGenerator: Send + Sync {
    /// Generate a spec from a description.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Generator`] when the provider call fails or returns
    /// output that is not a parseable spec.
    async fn generate(&self, request: GenerateRequest) -> Result<GeneratedSpec>;

    /// Rewrite an existing spec according to a modification instruction.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`SpecGenerator::generate`].
    async fn modify(&self, spec: &ArchitectureSpec, instruction: &str) -> Result<ModifiedSpec>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::spec::Component;

    struct EchoGenerator;

    #[async_trait]
    impl SpecGenerator for EchoGenerator {
        async fn generate(&self, request: GenerateRequest) -> Result<GeneratedSpec> {
            Ok(GeneratedSpec {
                spec: ArchitectureSpec {
                    title: request.description,
                    provider: request.provider,
                    direction: request.direction,
                    out_formats: request.out_formats,
                    components: vec![Component::new("only", "Only", "ec2")],
                    connections: vec![],
                    clusters: vec![],
                    graphviz_attrs: Default::default(),
                },
            })
        }

        async fn modify(
            &self,
            spec: &ArchitectureSpec,
            instruction: &str,
        ) -> Result<ModifiedSpec> {
            Ok(ModifiedSpec {
                spec: spec.clone(),
                changes: vec![instruction.to_string()],
            })
        }
    }

    #[tokio::test]
    async fn test_generator_is_object_safe() {
        let generator: Box<dyn SpecGenerator> = Box::new(EchoGenerator);
        let out = generator
            .generate(GenerateRequest {
                description: "one box".to_string(),
                provider: Provider::Aws,
                out_formats: OutFormats::default(),
                direction: Direction::LR,
            })
            .await
            .unwrap();
        assert_eq!(out.spec.title, "one box");

        let modified = generator.modify(&out.spec, "add nothing").await.unwrap();
        assert_eq!(modified.changes, vec!["add nothing".to_string()]);
    }
}
