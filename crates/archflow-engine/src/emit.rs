//! Deterministic renderer-source emission.
//!
//! Identical specs and resolutions produce byte-identical source: imports are
//! grouped per module and sorted, attribute maps iterate in key order, and
//! edge grouping preserves first-occurrence order. The emitted program uses
//! the icon-aware graph-definition surface backed by Graphviz:
//! `Diagram`/`Cluster` context managers, node classes, `>>`/`<<`/`-`
//! operators and the `Edge` wrapper for labelled or attributed edges.

use crate::filename::sanitize_stem;
use archflow::spec::{ArchitectureSpec, Cluster, Connection, EdgeDirection};
use archflow_resolver::Resolution;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

/// Emission failures; all indicate an upstream contract violation.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A component has no resolution entry
    #[error("no resolved symbol for component {0:?}")]
    MissingResolution(String),

    /// A connection references a component absent from the spec
    #[error("connection references unknown component {0:?}")]
    DanglingEdge(String),
}

/// Emit renderer source for a spec.
///
/// `stem` is the (already sanitized, uniquified) filename stem the renderer
/// will write artifacts under.
///
/// # Errors
///
/// [`EmitError`] when a component lacks a resolution or an edge dangles;
/// both are guarded upstream by validation and resolution.
pub fn emit(
    spec: &ArchitectureSpec,
    resolutions: &BTreeMap<String, Resolution>,
    stem: &str,
) -> Result<String, EmitError> {
    for component in &spec.components {
        if !resolutions.contains_key(&component.id) {
            return Err(EmitError::MissingResolution(component.id.clone()));
        }
    }
    for connection in &spec.connections {
        for id in [&connection.from_id, &connection.to_id] {
            if !spec.has_component(id) {
                return Err(EmitError::DanglingEdge(id.clone()));
            }
        }
    }

    let vars = variable_names(spec);
    let mut out = String::new();

    emit_imports(&mut out, spec, resolutions);
    emit_diagram_open(&mut out, spec, stem);
    emit_bodies(&mut out, spec, resolutions, &vars);
    emit_edges(&mut out, spec, &vars);

    Ok(out)
}

/// Stable python variable names derived from component ids.
fn variable_names(spec: &ArchitectureSpec) -> HashMap<String, String> {
    let mut used: BTreeSet<String> = BTreeSet::new();
    let mut vars = HashMap::new();
    for component in &spec.components {
        let mut base: String = component
            .id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        if base.is_empty() || base.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            base.insert(0, 'n');
        }
        if is_python_keyword(&base) {
            base.push('_');
        }
        let mut candidate = base.clone();
        let mut n = 2;
        while used.contains(&candidate) {
            candidate = format!("{base}_{n}");
            n += 1;
        }
        used.insert(candidate.clone());
        vars.insert(component.id.clone(), candidate);
    }
    vars
}

fn is_python_keyword(word: &str) -> bool {
    matches!(
        word,
        "and" | "as" | "assert" | "async" | "await" | "break" | "class" | "continue" | "def"
            | "del" | "elif" | "else" | "except" | "finally" | "for" | "from" | "global" | "if"
            | "import" | "in" | "is" | "lambda" | "nonlocal" | "not" | "or" | "pass" | "raise"
            | "return" | "try" | "while" | "with" | "yield" | "None" | "True" | "False"
    )
}

fn emit_imports(
    out: &mut String,
    spec: &ArchitectureSpec,
    resolutions: &BTreeMap<String, Resolution>,
) {
    let mut base_imports = vec!["Diagram"];
    if !spec.clusters.is_empty() {
        base_imports.insert(0, "Cluster");
    }
    if spec.connections.iter().any(Connection::needs_wrapper) {
        base_imports.push("Edge");
    }
    out.push_str(&format!("from diagrams import {}\n", base_imports.join(", ")));

    let mut by_module: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    for resolution in resolutions.values() {
        by_module
            .entry(resolution.module)
            .or_default()
            .insert(resolution.class);
    }
    for (module, classes) in by_module {
        let list: Vec<&str> = classes.into_iter().collect();
        out.push_str(&format!("from {module} import {}\n", list.join(", ")));
    }
    out.push('\n');
}

fn emit_diagram_open(out: &mut String, spec: &ArchitectureSpec, stem: &str) {
    let formats: Vec<String> = spec
        .out_formats
        .iter()
        .map(|f| py_str(f.as_str()))
        .collect();
    let outformat = if formats.len() == 1 {
        formats[0].clone()
    } else {
        format!("[{}]", formats.join(", "))
    };

    out.push_str(&format!(
        "with Diagram({}, show=False, filename={}, direction={}, outformat={}",
        py_str(&spec.title),
        py_str(&sanitize_stem(stem)),
        py_str(spec.direction.as_str()),
        outformat,
    ));
    if !spec.graphviz_attrs.graph_attr.is_empty() {
        out.push_str(&format!(
            ", graph_attr={}",
            py_dict(&spec.graphviz_attrs.graph_attr)
        ));
    }
    if !spec.graphviz_attrs.node_attr.is_empty() {
        out.push_str(&format!(
            ", node_attr={}",
            py_dict(&spec.graphviz_attrs.node_attr)
        ));
    }
    if !spec.graphviz_attrs.edge_attr.is_empty() {
        out.push_str(&format!(
            ", edge_attr={}",
            py_dict(&spec.graphviz_attrs.edge_attr)
        ));
    }
    out.push_str("):\n");
}

fn emit_bodies(
    out: &mut String,
    spec: &ArchitectureSpec,
    resolutions: &BTreeMap<String, Resolution>,
    vars: &HashMap<String, String>,
) {
    for cluster in spec.root_clusters() {
        emit_cluster(out, spec, resolutions, vars, cluster, 1);
    }
    for id in spec.unclustered_component_ids() {
        emit_component(out, spec, resolutions, vars, id, 1);
    }
}

fn emit_cluster(
    out: &mut String,
    spec: &ArchitectureSpec,
    resolutions: &BTreeMap<String, Resolution>,
    vars: &HashMap<String, String>,
    cluster: &Cluster,
    depth: usize,
) {
    let indent = "    ".repeat(depth);
    if cluster.graphviz_attrs.is_empty() {
        out.push_str(&format!("{indent}with Cluster({}):\n", py_str(&cluster.name)));
    } else {
        out.push_str(&format!(
            "{indent}with Cluster({}, graph_attr={}):\n",
            py_str(&cluster.name),
            py_dict(&cluster.graphviz_attrs)
        ));
    }

    let mut emitted_any = false;
    // Member components in spec order, then child clusters in spec order.
    for component in &spec.components {
        if cluster.component_ids.contains(&component.id) {
            emit_component(out, spec, resolutions, vars, &component.id, depth + 1);
            emitted_any = true;
        }
    }
    for child in spec.child_clusters(&cluster.id) {
        emit_cluster(out, spec, resolutions, vars, child, depth + 1);
        emitted_any = true;
    }
    if !emitted_any {
        out.push_str(&format!("{}pass\n", "    ".repeat(depth + 1)));
    }
}

fn emit_component(
    out: &mut String,
    spec: &ArchitectureSpec,
    resolutions: &BTreeMap<String, Resolution>,
    vars: &HashMap<String, String>,
    id: &str,
    depth: usize,
) {
    let Some(component) = spec.component(id) else {
        return;
    };
    let (Some(resolution), Some(var)) = (resolutions.get(id), vars.get(id)) else {
        return;
    };
    let indent = "    ".repeat(depth);
    let mut line = format!(
        "{indent}{var} = {}({}",
        resolution.class,
        py_str(&component.name)
    );
    if let Some(attrs) = &component.graphviz_attrs {
        for (key, value) in attrs {
            line.push_str(&format!(", {key}={}", py_str(value)));
        }
    }
    line.push_str(")\n");
    out.push_str(&line);
}

/// Edges that share a destination and operator and need no wrapper collapse
/// into the `[a, b] >> dst` group form; everything else is emitted singly.
fn emit_edges(out: &mut String, spec: &ArchitectureSpec, vars: &HashMap<String, String>) {
    if spec.connections.is_empty() {
        return;
    }
    out.push('\n');

    // Group keys in first-occurrence order.
    let mut group_order: Vec<(String, EdgeDirection)> = Vec::new();
    let mut groups: HashMap<(String, EdgeDirection), Vec<&Connection>> = HashMap::new();
    let mut singles: Vec<&Connection> = Vec::new();

    for connection in &spec.connections {
        if connection.needs_wrapper() {
            singles.push(connection);
            continue;
        }
        let key = (connection.to_id.clone(), connection.direction);
        if !groups.contains_key(&key) {
            group_order.push(key.clone());
        }
        groups.entry(key).or_default().push(connection);
    }

    for key in &group_order {
        let members = &groups[key];
        let operator = operator_for(key.1);
        let dst = &vars[&key.0];
        if members.len() == 1 {
            let src = &vars[&members[0].from_id];
            out.push_str(&format!("    {src} {operator} {dst}\n"));
        } else {
            let sources: Vec<&str> = members.iter().map(|c| vars[&c.from_id].as_str()).collect();
            out.push_str(&format!("    [{}] {operator} {dst}\n", sources.join(", ")));
        }
    }

    for connection in singles {
        let src = &vars[&connection.from_id];
        let dst = &vars[&connection.to_id];
        let operator = operator_for(connection.direction);
        out.push_str(&format!(
            "    {src} {operator} {} {operator} {dst}\n",
            edge_wrapper(connection)
        ));
    }
}

fn operator_for(direction: EdgeDirection) -> &'static str {
    match direction {
        EdgeDirection::Forward => ">>",
        EdgeDirection::Backward => "<<",
        EdgeDirection::Bidirectional => "-",
    }
}

fn edge_wrapper(connection: &Connection) -> String {
    let mut args = Vec::new();
    if let Some(label) = &connection.label {
        args.push(format!("label={}", py_str(label)));
    }
    if let Some(attrs) = &connection.graphviz_attrs {
        for (key, value) in attrs {
            args.push(format!("{key}={}", py_str(value)));
        }
    }
    format!("Edge({})", args.join(", "))
}

/// Python string literal with escaping.
fn py_str(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Python dict literal in key order.
fn py_dict(map: &BTreeMap<String, String>) -> String {
    let entries: Vec<String> = map
        .iter()
        .map(|(k, v)| format!("{}: {}", py_str(k), py_str(v)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}
