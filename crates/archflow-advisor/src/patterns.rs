//! Pattern-derived edge suggestion.
//!
//! A closed catalog of well-known architectures. When a spec's component set
//! contains all of a pattern's types but is missing some of the pattern's
//! edges, the missing edges are added between the first components of the
//! respective types. User edges are never removed or rewritten.

use archflow::spec::{ArchitectureSpec, Connection};

struct Pattern {
    name: &'static str,
    /// Normalized type ids that must all be present
    components: &'static [&'static str],
    /// `(from type, to type)` edges the pattern implies
    edges: &'static [(&'static str, &'static str)],
}

static PATTERNS: &[Pattern] = &[
    Pattern {
        name: "serverless-api",
        components: &["apigateway", "lambda", "dynamodb"],
        edges: &[("apigateway", "lambda"), ("lambda", "dynamodb")],
    },
    Pattern {
        name: "three-tier",
        components: &["alb", "ec2", "rds"],
        edges: &[("alb", "ec2"), ("ec2", "rds")],
    },
    Pattern {
        name: "microservices",
        components: &["alb", "ecs", "rds"],
        edges: &[("alb", "ecs"), ("ecs", "rds")],
    },
    Pattern {
        name: "data-pipeline",
        components: &["kinesis", "lambda", "s3"],
        edges: &[("kinesis", "lambda"), ("lambda", "s3")],
    },
    Pattern {
        name: "vpc-topology",
        components: &["internetgateway", "publicsubnet", "privatesubnet"],
        edges: &[
            ("internetgateway", "publicsubnet"),
            ("publicsubnet", "privatesubnet"),
        ],
    },
];

fn normalize(type_id: &str) -> String {
    type_id
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// First component of a normalized type, in spec order.
fn first_of_type<'a>(spec: &'a ArchitectureSpec, normalized_type: &str) -> Option<&'a str> {
    spec.components
        .iter()
        .find(|c| normalize(&c.type_id) == normalized_type)
        .map(|c| c.id.as_str())
}

fn edge_exists(spec: &ArchitectureSpec, from_id: &str, to_id: &str) -> bool {
    spec.connections
        .iter()
        .any(|c| c.from_id == from_id && c.to_id == to_id)
}

/// Add edges implied by matched patterns. Returns how many were added.
pub fn suggest_edges(spec: &mut ArchitectureSpec) -> usize {
    let mut added = 0;
    for pattern in PATTERNS {
        let matches = pattern
            .components
            .iter()
            .all(|t| first_of_type(spec, t).is_some());
        if !matches {
            continue;
        }

        for (from_type, to_type) in pattern.edges {
            let (Some(from_id), Some(to_id)) =
                (first_of_type(spec, from_type), first_of_type(spec, to_type))
            else {
                continue;
            };
            if edge_exists(spec, from_id, to_id) {
                continue;
            }
            let (from_id, to_id) = (from_id.to_string(), to_id.to_string());
            tracing::info!(
                pattern = pattern.name,
                from = %from_id,
                to = %to_id,
                "adding pattern edge"
            );
            spec.connections.push(Connection::new(from_id, to_id));
            added += 1;
        }
    }
    added
}
