//! Relevance pre-gate.
//!
//! Rejects requests that are obviously not about cloud architecture before
//! any LLM call is made. The filter is a keyword gate, deliberately cheap and
//! permissive: one architecture term anywhere in the description is enough.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Terms that mark a description as architecture-related. Matching is done on
/// lowercased tokens.
const ARCHITECTURE_TERMS: &[&str] = &[
    // vendors and their shorthand
    "aws", "amazon", "azure", "gcp", "google",
    // generic infrastructure vocabulary
    "architecture", "diagram", "infrastructure", "cloud", "deploy", "deployment",
    "service", "services", "server", "servers", "backend", "frontend", "api",
    "microservice", "microservices", "serverless", "container", "containers",
    "cluster", "instance", "instances", "network", "subnet", "vpc", "gateway",
    "database", "storage", "queue", "topic", "cache", "cdn", "dns",
    "pipeline", "stream", "streaming", "etl", "warehouse", "analytics",
    "kubernetes", "k8s", "docker", "monitoring", "logging",
    // well-known service names users reach for
    "lambda", "ec2", "s3", "rds", "dynamodb", "sqs", "sns", "fargate", "eks",
    "ecs", "cloudfront", "route53", "kinesis", "redshift", "sagemaker",
    "bigquery", "cosmosdb", "firestore", "appservice", "loadbalancer",
    "load-balancer",
];

/// Minimum characters for a usable description.
pub const MIN_DESCRIPTION_CHARS: usize = 8;

/// Maximum characters accepted for a description.
pub const MAX_DESCRIPTION_CHARS: usize = 8 * 1024;

fn term_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ARCHITECTURE_TERMS.iter().copied().collect())
}

/// Check whether a description plausibly describes a cloud architecture.
///
/// # Errors
///
/// Returns a user-facing message when the description is too short, too long
/// or contains no architecture vocabulary at all.
pub fn check_description(description: &str) -> Result<(), String> {
    let trimmed = description.trim();
    if trimmed.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(format!(
            "description is too short; describe the architecture in at least {MIN_DESCRIPTION_CHARS} characters"
        ));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(format!(
            "description is too long (limit {MAX_DESCRIPTION_CHARS} characters)"
        ));
    }

    let terms = term_set();
    let mentions_architecture = trimmed
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .any(|token| terms.contains(token.as_str()));

    if mentions_architecture {
        Ok(())
    } else {
        Err(
            "this doesn't look like a cloud architecture description; mention the services, \
             servers, databases or networks the diagram should show"
                .to_string(),
        )
    }
}
