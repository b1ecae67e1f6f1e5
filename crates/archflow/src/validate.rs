//! Ingest validation for architecture specs.
//!
//! Every spec produced by the LLM or submitted by a client is validated here
//! before the advisor or resolver sees it. Validation collects all issues in
//! one pass so the client gets the complete list, not just the first failure.

use crate::spec::ArchitectureSpec;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Structural limits on an ingested spec.
pub const MAX_COMPONENTS: usize = 100;
pub const MAX_CONNECTIONS: usize = 300;
pub const MAX_CLUSTERS: usize = 30;
pub const MAX_TITLE_CHARS: usize = 200;

/// A spec that failed structural validation, with every issue found.
#[derive(Debug, Clone, Error)]
#[error("invalid spec: {}", issues.join("; "))]
pub struct SpecValidationError {
    /// All issues found, in detection order
    pub issues: Vec<String>,
}

/// Validate the invariants the rest of the pipeline relies on.
///
/// Checks, in order: title shape, size limits, component id uniqueness,
/// connection endpoint existence, cluster id uniqueness, cluster membership
/// (existing components, pairwise disjoint), and that the cluster parent
/// graph is a forest.
///
/// # Errors
///
/// Returns a [`SpecValidationError`] listing every violated invariant.
pub fn validate(spec: &ArchitectureSpec) -> Result<(), SpecValidationError> {
    let mut issues = Vec::new();

    if spec.title.trim().is_empty() {
        issues.push("title must not be empty".to_string());
    }
    if spec.title.chars().count() > MAX_TITLE_CHARS {
        issues.push(format!("title exceeds {MAX_TITLE_CHARS} characters"));
    }

    if spec.components.is_empty() {
        issues.push("spec must contain at least one component".to_string());
    }
    if spec.components.len() > MAX_COMPONENTS {
        issues.push(format!(
            "too many components: {} (limit {MAX_COMPONENTS})",
            spec.components.len()
        ));
    }
    if spec.connections.len() > MAX_CONNECTIONS {
        issues.push(format!(
            "too many connections: {} (limit {MAX_CONNECTIONS})",
            spec.connections.len()
        ));
    }
    if spec.clusters.len() > MAX_CLUSTERS {
        issues.push(format!(
            "too many clusters: {} (limit {MAX_CLUSTERS})",
            spec.clusters.len()
        ));
    }

    let mut component_ids = HashSet::new();
    for c in &spec.components {
        if c.id.trim().is_empty() {
            issues.push("component with empty id".to_string());
        } else if !component_ids.insert(c.id.as_str()) {
            issues.push(format!("duplicate component id {:?}", c.id));
        }
        if c.type_id.trim().is_empty() {
            issues.push(format!("component {:?} has an empty type", c.id));
        }
    }

    for conn in &spec.connections {
        if !component_ids.contains(conn.from_id.as_str()) {
            issues.push(format!(
                "connection references unknown source component {:?}",
                conn.from_id
            ));
        }
        if !component_ids.contains(conn.to_id.as_str()) {
            issues.push(format!(
                "connection references unknown target component {:?}",
                conn.to_id
            ));
        }
    }

    let mut cluster_ids = HashSet::new();
    for cl in &spec.clusters {
        if !cluster_ids.insert(cl.id.as_str()) {
            issues.push(format!("duplicate cluster id {:?}", cl.id));
        }
    }

    let mut claimed: HashMap<&str, &str> = HashMap::new();
    for cl in &spec.clusters {
        for member in &cl.component_ids {
            if !component_ids.contains(member.as_str()) {
                issues.push(format!(
                    "cluster {:?} references unknown component {:?}",
                    cl.id, member
                ));
            }
            if let Some(prev) = claimed.insert(member.as_str(), cl.id.as_str()) {
                issues.push(format!(
                    "component {member:?} belongs to both cluster {prev:?} and cluster {:?}",
                    cl.id
                ));
            }
        }
        if let Some(parent) = &cl.parent_id {
            if !cluster_ids.contains(parent.as_str()) {
                issues.push(format!(
                    "cluster {:?} references unknown parent {:?}",
                    cl.id, parent
                ));
            }
        }
    }

    issues.extend(cluster_cycles(spec));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SpecValidationError { issues })
    }
}

/// Detect cycles in the cluster parent graph by walking parent chains.
fn cluster_cycles(spec: &ArchitectureSpec) -> Vec<String> {
    let parents: HashMap<&str, &str> = spec
        .clusters
        .iter()
        .filter_map(|c| c.parent_id.as_deref().map(|p| (c.id.as_str(), p)))
        .collect();

    let mut issues = Vec::new();
    for cl in &spec.clusters {
        let mut seen = HashSet::new();
        let mut cursor = cl.id.as_str();
        seen.insert(cursor);
        while let Some(&parent) = parents.get(cursor) {
            if !seen.insert(parent) {
                issues.push(format!(
                    "cluster parent chain starting at {:?} contains a cycle",
                    cl.id
                ));
                break;
            }
            cursor = parent;
        }
    }
    issues
}
