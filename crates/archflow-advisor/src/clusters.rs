//! Cluster auto-formation.
//!
//! Three or more unclustered components on the same architectural layer read
//! better grouped; the advisor wraps them in a cluster labelled by the layer
//! name. Components already claimed by a user cluster are never touched.

use crate::layers::{layer_name, layer_of};
use archflow::spec::{ArchitectureSpec, AttrMap, Cluster};
use std::collections::BTreeMap;

/// Minimum same-layer components before a cluster is formed.
const MIN_GROUP: usize = 3;

/// Form layer clusters where warranted. Returns the new cluster ids.
pub fn auto_form(spec: &mut ArchitectureSpec) -> Vec<String> {
    let unclustered: Vec<String> = spec
        .unclustered_component_ids()
        .into_iter()
        .map(String::from)
        .collect();

    let mut by_layer: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    for id in unclustered {
        if let Some(component) = spec.component(&id) {
            by_layer
                .entry(layer_of(&component.type_id))
                .or_default()
                .push(id);
        }
    }

    let mut formed = Vec::new();
    for (layer, members) in by_layer {
        if members.len() < MIN_GROUP {
            continue;
        }
        let name = layer_name(layer);
        let id = unique_cluster_id(spec, &format!("{}_group", name.to_lowercase()));
        tracing::info!(cluster = %id, layer, members = members.len(), "auto-forming layer cluster");
        spec.clusters.push(Cluster {
            id: id.clone(),
            name: name.to_string(),
            component_ids: members,
            parent_id: None,
            graphviz_attrs: AttrMap::new(),
        });
        formed.push(id);
    }
    formed
}

fn unique_cluster_id(spec: &ArchitectureSpec, base: &str) -> String {
    if !spec.clusters.iter().any(|c| c.id == base) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}{n}");
        if !spec.clusters.iter().any(|c| c.id == candidate) {
            return candidate;
        }
        n += 1;
    }
}
