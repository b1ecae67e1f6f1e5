//! Missing-component inference.
//!
//! Some component types only make sense inside networking context the user
//! often leaves out ("an EC2 instance and an RDS database" implies a VPC and
//! a subnet). When a component's declared dependencies are entirely absent
//! from the spec, they are synthesized with generated ids. Inference is
//! suppressed when the request restricted its scope.

use archflow::spec::{ArchitectureSpec, Component};

/// `(dependent type, required types)`. Keys are normalized type ids; values
/// are catalog-shaped ids, the form synthesized components carry.
static DEPENDENCIES: &[(&str, &[&str])] = &[
    ("ec2", &["vpc", "subnet"]),
    ("rds", &["vpc", "subnet"]),
    ("aurora", &["vpc", "subnet"]),
    ("ecs", &["vpc", "subnet"]),
    ("eks", &["vpc", "subnet"]),
    ("elasticache", &["vpc", "subnet"]),
    ("alb", &["vpc"]),
    ("nlb", &["vpc"]),
    ("nat_gateway", &["vpc", "public_subnet"]),
    ("internet_gateway", &["vpc"]),
];

fn normalize(type_id: &str) -> String {
    type_id
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn display_name(type_id: &str) -> String {
    match type_id {
        "vpc" => "VPC".to_string(),
        "subnet" => "Private Subnet".to_string(),
        "public_subnet" => "Public Subnet".to_string(),
        other => {
            let mut name = other.to_string();
            if let Some(first) = name.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            name
        }
    }
}

/// Synthesize components for dependencies that are entirely missing.
///
/// For each component with a dependency declaration, when *none* of the
/// required types appears in the spec, all of them are added (once, however
/// many dependents need them). Returns the ids of synthesized components.
pub fn infer_missing(spec: &mut ArchitectureSpec) -> Vec<String> {
    let present: Vec<String> = spec
        .components
        .iter()
        .map(|c| normalize(&c.type_id))
        .collect();

    let mut to_add: Vec<&str> = Vec::new();
    for component in &spec.components {
        let normalized = normalize(&component.type_id);
        let Some((_, required)) = DEPENDENCIES
            .iter()
            .find(|(t, _)| normalize(t) == normalized)
        else {
            continue;
        };

        let any_present = required.iter().any(|needed| {
            present
                .iter()
                .any(|p| dependency_satisfied(p, &normalize(needed)))
        });
        if any_present {
            continue;
        }

        for &needed in *required {
            if !to_add.contains(&needed) {
                to_add.push(needed);
            }
        }
    }

    let mut synthesized = Vec::new();
    for type_id in to_add {
        let id = generated_id(spec, type_id);
        tracing::info!(component = %id, r#type = type_id, "synthesizing missing dependency");
        spec.components
            .push(Component::new(id.clone(), display_name(type_id), type_id));
        synthesized.push(id);
    }
    synthesized
}

/// A `subnet` requirement is satisfied by any subnet flavor.
fn dependency_satisfied(present: &str, needed: &str) -> bool {
    if present == needed {
        return true;
    }
    needed == "subnet" && (present == "publicsubnet" || present == "privatesubnet")
}

fn generated_id(spec: &ArchitectureSpec, type_id: &str) -> String {
    let base = format!("{}_auto", type_id);
    if !spec.has_component(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if !spec.has_component(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spec_with(types: &[(&str, &str)]) -> ArchitectureSpec {
        serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": types
                .iter()
                .map(|(id, ty)| serde_json::json!({"id": id, "name": id, "type": ty}))
                .collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn test_ec2_without_networking_synthesizes_vpc_and_subnet() {
        let mut spec = spec_with(&[("web", "ec2")]);
        let added = infer_missing(&mut spec);
        assert_eq!(added, vec!["vpc_auto", "subnet_auto"]);
        assert!(spec.has_component("vpc_auto"));
        assert!(spec.has_component("subnet_auto"));
    }

    #[test]
    fn test_existing_dependency_suppresses_inference() {
        let mut spec = spec_with(&[("web", "ec2"), ("net", "vpc")]);
        let added = infer_missing(&mut spec);
        assert!(added.is_empty());
        assert_eq!(spec.components.len(), 2);
    }

    #[test]
    fn test_subnet_flavor_counts_as_subnet() {
        let mut spec = spec_with(&[("db", "rds"), ("sn", "private_subnet")]);
        let added = infer_missing(&mut spec);
        assert!(added.is_empty());
    }

    #[test]
    fn test_shared_dependencies_synthesized_once() {
        let mut spec = spec_with(&[("web", "ec2"), ("db", "rds")]);
        let added = infer_missing(&mut spec);
        assert_eq!(added.len(), 2);
        assert_eq!(
            spec.components
                .iter()
                .filter(|c| c.type_id == "vpc")
                .count(),
            1
        );
    }

    #[test]
    fn test_inference_is_idempotent() {
        let mut spec = spec_with(&[("web", "ec2")]);
        infer_missing(&mut spec);
        let second = infer_missing(&mut spec);
        assert!(second.is_empty());
    }

    #[test]
    fn test_generated_ids_avoid_collisions() {
        let mut spec = spec_with(&[("web", "ec2"), ("vpc_auto", "lambda")]);
        let added = infer_missing(&mut spec);
        assert!(added.contains(&"vpc_auto2".to_string()));
    }

    #[test]
    fn test_unrelated_types_untouched() {
        let mut spec = spec_with(&[("fn", "lambda"), ("store", "s3")]);
        let added = infer_missing(&mut spec);
        assert!(added.is_empty());
    }
}
