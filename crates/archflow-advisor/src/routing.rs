//! Edge-routing attribute policy.
//!
//! Graphviz routing quality degrades sharply as edge count grows; the policy
//! trades spline beauty for legibility in steps. `overlap=false` is the
//! precondition for any of it to work. User-supplied attribute values are
//! never overridden.

use archflow::spec::{ArchitectureSpec, AttrMap};

/// Database type families that get south-to-north port pinning.
static DATABASE_FAMILIES: &[&str] = &[
    "rds",
    "aurora",
    "dynamodb",
    "elasticache",
    "redis",
    "memcached",
    "redshift",
    "documentdb",
    "neptune",
    "timestream",
    "database",
    "db",
    "sqldatabase",
    "cosmosdb",
    "mysql",
    "postgresql",
    "cloudsql",
    "firestore",
    "bigtable",
    "spanner",
];

fn normalize(type_id: &str) -> String {
    type_id
        .chars()
        .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn set_default(map: &mut AttrMap, key: &str, value: &str) {
    map.entry(key.to_string())
        .or_insert_with(|| value.to_string());
}

/// Apply the routing policy for the spec's connection count.
pub fn apply(spec: &mut ArchitectureSpec) {
    let connections = spec.connections.len();

    let (splines, concentrate, nodesep, ranksep) = if connections > 15 {
        ("polyline", Some("true"), "1.0", "1.5")
    } else if connections >= 10 {
        ("ortho", None, "0.9", "1.3")
    } else if connections >= 5 {
        ("polyline", None, "0.8", "1.2")
    } else {
        ("polyline", None, "0.8", "1.0")
    };

    let graph = &mut spec.graphviz_attrs.graph_attr;
    set_default(graph, "splines", splines);
    if let Some(concentrate) = concentrate {
        set_default(graph, "concentrate", concentrate);
    }
    set_default(graph, "nodesep", nodesep);
    set_default(graph, "ranksep", ranksep);
    set_default(graph, "overlap", "false");

    let node = &mut spec.graphviz_attrs.node_attr;
    set_default(node, "fixedsize", "shape");
    set_default(node, "width", "1.0");
    set_default(node, "height", "1.0");

    pin_database_ports(spec);
}

/// For edges into database-family targets, pin the edge to leave the source
/// from the south side and enter the target from the north, keeping databases
/// visually anchored below their consumers.
fn pin_database_ports(spec: &mut ArchitectureSpec) {
    let database_ids: Vec<String> = spec
        .components
        .iter()
        .filter(|c| {
            let normalized = normalize(&c.type_id);
            DATABASE_FAMILIES
                .iter()
                .any(|family| normalized == *family || normalized.starts_with(family))
        })
        .map(|c| c.id.clone())
        .collect();

    for connection in &mut spec.connections {
        if !database_ids.iter().any(|id| *id == connection.to_id) {
            continue;
        }
        let attrs = connection.graphviz_attrs.get_or_insert_with(AttrMap::new);
        set_default(attrs, "tailport", "s");
        set_default(attrs, "headport", "n");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spec_with_edges(n: usize) -> ArchitectureSpec {
        let components: Vec<_> = (0..n.max(2))
            .map(|i| serde_json::json!({"id": format!("c{i}"), "name": format!("C{i}"), "type": "ec2"}))
            .collect();
        let connections: Vec<_> = (0..n)
            .map(|i| {
                serde_json::json!({
                    "from_id": format!("c{}", i % components.len()),
                    "to_id": format!("c{}", (i + 1) % components.len())
                })
            })
            .collect();
        serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": components,
            "connections": connections
        }))
        .unwrap()
    }

    #[test]
    fn test_dense_graph_gets_concentrate() {
        let mut spec = spec_with_edges(16);
        apply(&mut spec);
        let graph = &spec.graphviz_attrs.graph_attr;
        assert_eq!(graph["splines"], "polyline");
        assert_eq!(graph["concentrate"], "true");
        assert_eq!(graph["nodesep"], "1.0");
        assert_eq!(graph["ranksep"], "1.5");
    }

    #[test]
    fn test_medium_graph_gets_ortho() {
        let mut spec = spec_with_edges(12);
        apply(&mut spec);
        let graph = &spec.graphviz_attrs.graph_attr;
        assert_eq!(graph["splines"], "ortho");
        assert!(graph.get("concentrate").is_none());
        assert_eq!(graph["ranksep"], "1.3");
    }

    #[test]
    fn test_small_graph_gets_polyline() {
        let mut spec = spec_with_edges(7);
        apply(&mut spec);
        assert_eq!(spec.graphviz_attrs.graph_attr["splines"], "polyline");
        assert_eq!(spec.graphviz_attrs.graph_attr["ranksep"], "1.2");
    }

    #[test]
    fn test_sparse_graph_defaults() {
        let mut spec = spec_with_edges(2);
        apply(&mut spec);
        let graph = &spec.graphviz_attrs.graph_attr;
        assert_eq!(graph["splines"], "polyline");
        assert_eq!(graph["nodesep"], "0.8");
        assert_eq!(graph["ranksep"], "1.0");
    }

    #[test]
    fn test_overlap_and_node_defaults_always_set() {
        let mut spec = spec_with_edges(1);
        apply(&mut spec);
        assert_eq!(spec.graphviz_attrs.graph_attr["overlap"], "false");
        assert_eq!(spec.graphviz_attrs.node_attr["fixedsize"], "shape");
        assert_eq!(spec.graphviz_attrs.node_attr["width"], "1.0");
        assert_eq!(spec.graphviz_attrs.node_attr["height"], "1.0");
    }

    #[test]
    fn test_user_values_never_overridden() {
        let mut spec = spec_with_edges(16);
        spec.graphviz_attrs
            .graph_attr
            .insert("splines".to_string(), "curved".to_string());
        spec.graphviz_attrs
            .node_attr
            .insert("width".to_string(), "2.5".to_string());
        apply(&mut spec);
        assert_eq!(spec.graphviz_attrs.graph_attr["splines"], "curved");
        assert_eq!(spec.graphviz_attrs.node_attr["width"], "2.5");
    }

    #[test]
    fn test_database_ports_pinned() {
        let mut spec: ArchitectureSpec = serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": [
                {"id": "fn", "name": "Handler", "type": "lambda"},
                {"id": "db", "name": "Orders", "type": "rds"}
            ],
            "connections": [{"from_id": "fn", "to_id": "db"}]
        }))
        .unwrap();
        apply(&mut spec);
        let attrs = spec.connections[0].graphviz_attrs.as_ref().unwrap();
        assert_eq!(attrs["tailport"], "s");
        assert_eq!(attrs["headport"], "n");
    }

    #[test]
    fn test_database_port_family_prefix_matches() {
        let mut spec: ArchitectureSpec = serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": [
                {"id": "fn", "name": "Handler", "type": "lambda"},
                {"id": "db", "name": "Cluster", "type": "aurora-postgres"}
            ],
            "connections": [{"from_id": "fn", "to_id": "db"}]
        }))
        .unwrap();
        apply(&mut spec);
        assert!(spec.connections[0].graphviz_attrs.is_some());
    }

    #[test]
    fn test_existing_ports_respected() {
        let mut spec: ArchitectureSpec = serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": [
                {"id": "fn", "name": "Handler", "type": "lambda"},
                {"id": "db", "name": "Orders", "type": "rds"}
            ],
            "connections": [{
                "from_id": "fn",
                "to_id": "db",
                "graphviz_attrs": {"tailport": "e"}
            }]
        }))
        .unwrap();
        apply(&mut spec);
        let attrs = spec.connections[0].graphviz_attrs.as_ref().unwrap();
        assert_eq!(attrs["tailport"], "e");
        assert_eq!(attrs["headport"], "n");
    }

    #[test]
    fn test_non_database_edges_untouched() {
        let mut spec: ArchitectureSpec = serde_json::from_value(serde_json::json!({
            "title": "t",
            "components": [
                {"id": "api", "name": "API", "type": "apigateway"},
                {"id": "fn", "name": "Handler", "type": "lambda"}
            ],
            "connections": [{"from_id": "api", "to_id": "fn"}]
        }))
        .unwrap();
        apply(&mut spec);
        assert!(spec.connections[0].graphviz_attrs.is_none());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut spec = spec_with_edges(12);
        apply(&mut spec);
        let once = spec.clone();
        apply(&mut spec);
        assert_eq!(spec, once);
    }
}
