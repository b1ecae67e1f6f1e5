//! The architecture spec: the central value passed between the generator,
//! advisor, resolver and engine.
//!
//! Wire shape notes:
//! - clusters are a flat list forming a forest through `parent_id`, never a
//!   recursive tree
//! - `out_format` accepts either a single string or an ordered list; it is
//!   normalized to an ordered, deduplicated [`OutFormats`] on ingest
//! - all attribute maps are `BTreeMap` so that emission downstream is
//!   deterministic for identical specs

use schemars::{json_schema, JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Cloud vendor namespace selecting the icon set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Amazon Web Services
    #[default]
    Aws,
    /// Microsoft Azure
    Azure,
    /// Google Cloud Platform
    Gcp,
}

impl Provider {
    /// All supported providers, in documentation order.
    pub const ALL: [Provider; 3] = [Provider::Aws, Provider::Azure, Provider::Gcp];

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "azure",
            Provider::Gcp => "gcp",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aws" => Ok(Provider::Aws),
            "azure" => Ok(Provider::Azure),
            "gcp" => Ok(Provider::Gcp),
            other => Err(format!(
                "unknown provider {other:?}, expected one of: aws, azure, gcp"
            )),
        }
    }
}

/// Graph rank direction.
///
/// The orchestrator coerces this to `LR` on the natural-language path before
/// the spec reaches the engine; the other variants exist for the direct-code
/// path and for wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Direction {
    /// Left to right
    #[default]
    LR,
    /// Top to bottom
    TB,
    /// Bottom to top
    BT,
    /// Right to left
    RL,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::LR => "LR",
            Direction::TB => "TB",
            Direction::BT => "BT",
            Direction::RL => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LR" => Ok(Direction::LR),
            "TB" => Ok(Direction::TB),
            "BT" => Ok(Direction::BT),
            "RL" => Ok(Direction::RL),
            other => Err(format!(
                "unknown direction {other:?}, expected one of: LR, TB, BT, RL"
            )),
        }
    }
}

/// Output artifact format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum OutFormat {
    /// Raster image
    #[default]
    Png,
    /// Vector image
    Svg,
    /// Document
    Pdf,
    /// Graphviz source
    Dot,
}

impl OutFormat {
    pub const ALL: [OutFormat; 4] = [
        OutFormat::Png,
        OutFormat::Svg,
        OutFormat::Pdf,
        OutFormat::Dot,
    ];

    /// Lowercase wire name; also the file extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutFormat::Png => "png",
            OutFormat::Svg => "svg",
            OutFormat::Pdf => "pdf",
            OutFormat::Dot => "dot",
        }
    }

    /// File extension for artifacts of this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(OutFormat::Png),
            "svg" => Ok(OutFormat::Svg),
            "pdf" => Ok(OutFormat::Pdf),
            "dot" => Ok(OutFormat::Dot),
            other => Err(format!(
                "unknown output format {other:?}, expected one of: png, svg, pdf, dot"
            )),
        }
    }
}

/// Ordered, deduplicated set of output formats.
///
/// Deserializes from either a single string (`"png"`) or a list
/// (`["png", "svg"]`); input order is preserved, duplicates are dropped.
/// Guaranteed non-empty after construction through [`OutFormats::new`] or
/// deserialization of a non-empty input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutFormats(Vec<OutFormat>);

impl OutFormats {
    /// Build from an iterator, deduplicating while preserving order.
    /// Falls back to `[png]` when the input is empty.
    pub fn new<I: IntoIterator<Item = OutFormat>>(formats: I) -> Self {
        let mut seen = Vec::new();
        for f in formats {
            if !seen.contains(&f) {
                seen.push(f);
            }
        }
        if seen.is_empty() {
            seen.push(OutFormat::default());
        }
        OutFormats(seen)
    }

    /// Single-format constructor.
    #[must_use]
    pub fn single(format: OutFormat) -> Self {
        OutFormats(vec![format])
    }

    /// First requested format; the deterministic pick for singular URLs.
    #[must_use]
    pub fn primary(&self) -> OutFormat {
        self.0[0]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[OutFormat] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OutFormat> + '_ {
        self.0.iter().copied()
    }
}

impl Default for OutFormats {
    fn default() -> Self {
        OutFormats::single(OutFormat::default())
    }
}

impl<'de> Deserialize<'de> for OutFormats {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(OutFormat),
            Many(Vec<OutFormat>),
        }

        match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(f) => Ok(OutFormats::single(f)),
            OneOrMany::Many(v) => {
                if v.is_empty() {
                    return Err(serde::de::Error::custom("out_format list must not be empty"));
                }
                Ok(OutFormats::new(v))
            }
        }
    }
}

impl JsonSchema for OutFormats {
    fn schema_name() -> Cow<'static, str> {
        "OutFormats".into()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        json_schema!({
            "anyOf": [
                { "type": "string", "enum": ["png", "svg", "pdf", "dot"] },
                {
                    "type": "array",
                    "items": { "type": "string", "enum": ["png", "svg", "pdf", "dot"] },
                    "minItems": 1
                }
            ]
        })
    }
}

/// Edge direction selecting the renderer operator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    /// `>>` operator
    #[default]
    Forward,
    /// `<<` operator
    Backward,
    /// `-` operator
    Bidirectional,
}

/// String attribute map applied to a Graphviz scope.
pub type AttrMap = BTreeMap<String, String>;

/// The three Graphviz attribute scopes carried on a spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GraphvizAttrs {
    /// Graph-level attributes (`splines`, `nodesep`, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub graph_attr: AttrMap,

    /// Default node attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_attr: AttrMap,

    /// Default edge attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub edge_attr: AttrMap,
}

impl GraphvizAttrs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph_attr.is_empty() && self.node_attr.is_empty() && self.edge_attr.is_empty()
    }
}

/// A node in the architecture diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Component {
    /// Unique id within the spec; also the basis for the emitted variable name
    pub id: String,

    /// Display label
    pub name: String,

    /// Free-form component type submitted to the resolver (e.g. `lambda`,
    /// `load-balancer`, `subnet`)
    #[serde(rename = "type")]
    pub type_id: String,

    /// Per-component provider override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,

    /// Opaque metadata carried through untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,

    /// Per-node Graphviz attribute overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphviz_attrs: Option<AttrMap>,
}

impl Component {
    /// Minimal constructor used by the advisor when synthesizing components.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Component {
            id: id.into(),
            name: name.into(),
            type_id: type_id.into(),
            provider: None,
            metadata: BTreeMap::new(),
            graphviz_attrs: None,
        }
    }

    /// Effective provider for this component given the spec default.
    #[must_use]
    pub fn effective_provider(&self, spec_provider: Provider) -> Provider {
        self.provider.unwrap_or(spec_provider)
    }
}

/// A directed or bidirectional edge between two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Connection {
    /// Source component id
    pub from_id: String,

    /// Destination component id
    pub to_id: String,

    /// Optional edge label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Operator selection
    #[serde(default)]
    pub direction: EdgeDirection,

    /// Per-edge Graphviz attribute overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graphviz_attrs: Option<AttrMap>,
}

impl Connection {
    #[must_use]
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>) -> Self {
        Connection {
            from_id: from_id.into(),
            to_id: to_id.into(),
            label: None,
            direction: EdgeDirection::Forward,
            graphviz_attrs: None,
        }
    }

    /// Whether this edge needs the `Edge(...)` wrapper form when emitted.
    #[must_use]
    pub fn needs_wrapper(&self) -> bool {
        self.label.is_some() || self.graphviz_attrs.as_ref().is_some_and(|a| !a.is_empty())
    }
}

/// A visual grouping of components; nested through `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Cluster {
    /// Unique cluster id within the spec
    pub id: String,

    /// Display label
    pub name: String,

    /// Member component ids; a component belongs to at most one cluster
    #[serde(default)]
    pub component_ids: Vec<String>,

    /// Parent cluster id; the parent graph must form a forest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Cluster-scope Graphviz attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub graphviz_attrs: AttrMap,
}

/// The full structured description of a diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArchitectureSpec {
    /// Short human title; the sanitized filename stem
    pub title: String,

    /// Icon-set provider
    #[serde(default)]
    pub provider: Provider,

    /// Rank direction; coerced to LR by the orchestrator on the main path
    #[serde(default)]
    pub direction: Direction,

    /// Requested artifact format(s)
    #[serde(default, rename = "out_format")]
    pub out_formats: OutFormats,

    /// Ordered components, unique by id
    pub components: Vec<Component>,

    /// Ordered connections
    #[serde(default)]
    pub connections: Vec<Connection>,

    /// Flat cluster forest
    #[serde(default)]
    pub clusters: Vec<Cluster>,

    /// Spec-level attribute maps
    #[serde(default, skip_serializing_if = "GraphvizAttrs::is_empty")]
    pub graphviz_attrs: GraphvizAttrs,
}

impl ArchitectureSpec {
    /// Look up a component by id.
    #[must_use]
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Whether a component id exists in the spec.
    #[must_use]
    pub fn has_component(&self, id: &str) -> bool {
        self.component(id).is_some()
    }

    /// Ids of components not claimed by any cluster, in spec order.
    #[must_use]
    pub fn unclustered_component_ids(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|c| !self.clusters.iter().any(|cl| cl.component_ids.contains(&c.id)))
            .map(|c| c.id.as_str())
            .collect()
    }

    /// The cluster owning a component, if any.
    #[must_use]
    pub fn cluster_of(&self, component_id: &str) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|cl| cl.component_ids.iter().any(|id| id == component_id))
    }

    /// Top-level clusters (no parent), in spec order.
    #[must_use]
    pub fn root_clusters(&self) -> Vec<&Cluster> {
        self.clusters.iter().filter(|c| c.parent_id.is_none()).collect()
    }

    /// Direct children of a cluster, in spec order.
    #[must_use]
    pub fn child_clusters(&self, parent_id: &str) -> Vec<&Cluster> {
        self.clusters
            .iter()
            .filter(|c| c.parent_id.as_deref() == Some(parent_id))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn two_component_spec() -> ArchitectureSpec {
        ArchitectureSpec {
            title: "Test".to_string(),
            provider: Provider::Aws,
            direction: Direction::LR,
            out_formats: OutFormats::default(),
            components: vec![
                Component::new("api", "API", "apigateway"),
                Component::new("fn", "Handler", "lambda"),
            ],
            connections: vec![Connection::new("api", "fn")],
            clusters: vec![],
            graphviz_attrs: GraphvizAttrs::default(),
        }
    }

    #[test]
    fn test_provider_round_trip() {
        for p in Provider::ALL {
            assert_eq!(p.as_str().parse::<Provider>().unwrap(), p);
        }
        assert!("oracle".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_parse_is_case_insensitive() {
        assert_eq!("AWS".parse::<Provider>().unwrap(), Provider::Aws);
        assert_eq!(" Azure ".parse::<Provider>().unwrap(), Provider::Azure);
    }

    #[test]
    fn test_direction_round_trip() {
        for d in [Direction::LR, Direction::TB, Direction::BT, Direction::RL] {
            assert_eq!(d.as_str().parse::<Direction>().unwrap(), d);
        }
        assert!("diagonal".parse::<Direction>().is_err());
    }

    #[test]
    fn test_out_format_extension_matches_wire_name() {
        for f in OutFormat::ALL {
            assert_eq!(f.extension(), f.as_str());
        }
    }

    #[test]
    fn test_out_formats_from_single_string() {
        let f: OutFormats = serde_json::from_str(r#""svg""#).unwrap();
        assert_eq!(f.as_slice(), &[OutFormat::Svg]);
        assert_eq!(f.primary(), OutFormat::Svg);
    }

    #[test]
    fn test_out_formats_from_list_dedups_preserving_order() {
        let f: OutFormats = serde_json::from_str(r#"["pdf", "png", "pdf"]"#).unwrap();
        assert_eq!(f.as_slice(), &[OutFormat::Pdf, OutFormat::Png]);
        assert_eq!(f.primary(), OutFormat::Pdf);
    }

    #[test]
    fn test_out_formats_rejects_empty_list() {
        assert!(serde_json::from_str::<OutFormats>("[]").is_err());
    }

    #[test]
    fn test_out_formats_rejects_unknown_format() {
        assert!(serde_json::from_str::<OutFormats>(r#""jpeg""#).is_err());
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let json = r#"{
            "title": "Minimal",
            "components": [
                {"id": "web", "name": "Web Server", "type": "ec2"}
            ]
        }"#;
        let spec: ArchitectureSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.provider, Provider::Aws);
        assert_eq!(spec.direction, Direction::LR);
        assert_eq!(spec.out_formats.primary(), OutFormat::Png);
        assert!(spec.connections.is_empty());
        assert!(spec.clusters.is_empty());
    }

    #[test]
    fn test_spec_round_trip() {
        let spec = two_component_spec();
        let json = serde_json::to_string(&spec).unwrap();
        let back: ArchitectureSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn test_component_type_field_renamed_on_wire() {
        let json = serde_json::to_value(Component::new("db", "Orders DB", "rds")).unwrap();
        assert_eq!(json["type"], "rds");
        assert!(json.get("type_id").is_none());
    }

    #[test]
    fn test_effective_provider_override() {
        let mut c = Component::new("db", "DB", "rds");
        assert_eq!(c.effective_provider(Provider::Azure), Provider::Azure);
        c.provider = Some(Provider::Gcp);
        assert_eq!(c.effective_provider(Provider::Azure), Provider::Gcp);
    }

    #[test]
    fn test_connection_wrapper_detection() {
        let mut conn = Connection::new("a", "b");
        assert!(!conn.needs_wrapper());
        conn.label = Some("query".to_string());
        assert!(conn.needs_wrapper());

        let mut conn = Connection::new("a", "b");
        conn.graphviz_attrs = Some(BTreeMap::from([("color".to_string(), "red".to_string())]));
        assert!(conn.needs_wrapper());
    }

    #[test]
    fn test_cluster_forest_helpers() {
        let mut spec = two_component_spec();
        spec.clusters = vec![
            Cluster {
                id: "vpc".to_string(),
                name: "VPC".to_string(),
                component_ids: vec![],
                parent_id: None,
                graphviz_attrs: AttrMap::new(),
            },
            Cluster {
                id: "private".to_string(),
                name: "Private Subnet".to_string(),
                component_ids: vec!["fn".to_string()],
                parent_id: Some("vpc".to_string()),
                graphviz_attrs: AttrMap::new(),
            },
        ];

        let roots = spec.root_clusters();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].id, "vpc");
        assert_eq!(spec.child_clusters("vpc")[0].id, "private");
        assert_eq!(spec.cluster_of("fn").unwrap().id, "private");
        assert_eq!(spec.unclustered_component_ids(), vec!["api"]);
    }

    #[test]
    fn test_edge_direction_default_is_forward() {
        let conn: Connection = serde_json::from_str(r#"{"from_id": "a", "to_id": "b"}"#).unwrap();
        assert_eq!(conn.direction, EdgeDirection::Forward);
    }

    #[test]
    fn test_spec_json_schema_generates() {
        let schema = schemars::schema_for!(ArchitectureSpec);
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json["properties"]["components"].is_object());
        assert!(json["properties"]["out_format"].is_object());
    }
}
