//! Domain models and value objects

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

use crate::ports::Clock;

/// Schema version written by this crate and expected on import
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Whether a node is a grouping folder or a keyword tag.
///
/// The kind says nothing about tree position: a tag may have children and a
/// folder may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Folder,
    Tag,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the taxonomy tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier
    pub id: String,
    /// Display label, also the exported keyword (never contains a comma)
    pub label: String,
    /// Parent node id, `None` for root-level nodes
    #[serde(default)]
    pub parent_id: Option<String>,
    pub kind: NodeKind,
    /// Sort weight among siblings, backfilled on import when absent
    #[serde(
        default,
        deserialize_with = "deserialize_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
    /// Explicit export override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Unknown fields, carried through import/export untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Integer value of a JSON number, accepting integral floats such as `1.0`
pub fn integral_order(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn deserialize_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => integral_order(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("order must be an integer, got {}", value))),
    }
}

impl Node {
    /// Create a node with no order, override or passenger data
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        parent_id: Option<&str>,
        kind: NodeKind,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parent_id: parent_id.map(str::to_string),
            kind,
            order: None,
            export: None,
            aliases: None,
            meta: None,
            data: None,
            extra: Map::new(),
        }
    }

    pub fn folder(
        id: impl Into<String>,
        label: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        Self::new(id, label, parent_id, NodeKind::Folder)
    }

    pub fn tag(id: impl Into<String>, label: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self::new(id, label, parent_id, NodeKind::Tag)
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_export(mut self, export: bool) -> Self {
        self.export = Some(export);
        self
    }

    /// Generate a fresh node id (`node-<uuid>`)
    pub fn generate_id() -> String {
        format!("node-{}", Uuid::new_v4().simple())
    }

    /// Sibling sort weight; a missing order weighs as zero
    pub fn sort_weight(&self) -> i64 {
        self.order.unwrap_or(0)
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn should_export(&self) -> bool {
        should_export(self)
    }
}

/// Export eligibility: the explicit override if present, otherwise tags
/// export and folders do not.
pub fn should_export(node: &Node) -> bool {
    node.export.unwrap_or(node.kind == NodeKind::Tag)
}

/// Optional descriptive metadata of a taxonomy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A schema-versioned flat list of nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub schema_version: String,
    pub nodes: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<TaxonomyMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Taxonomy {
    /// Wrap a node list with the current schema version and no metadata
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            nodes,
            meta: None,
            extra: Map::new(),
        }
    }

    /// An empty tree stamped with creation time
    pub fn new_empty(name: Option<String>, clock: &dyn Clock) -> Self {
        let now = format_timestamp(clock.now());
        Self {
            meta: Some(TaxonomyMeta {
                name,
                created_at: Some(now.clone()),
                updated_at: Some(now),
                ..Default::default()
            }),
            ..Self::new(Vec::new())
        }
    }

    /// A small sample tree with tags that have children
    pub fn sample() -> Self {
        let nodes = vec![
            Node::folder("occupation", "职业", None).with_order(0),
            Node::tag("student", "学生", Some("occupation")).with_order(0),
            Node::tag("jk", "JK", Some("student")).with_order(0),
            Node::folder("clothing", "衣服", None).with_order(1),
            Node::folder("upper-body", "上半身", Some("clothing")).with_order(0),
            Node::tag("sailor-uniform", "水手服", Some("upper-body")).with_order(0),
            Node::folder("lower-body", "下半身", Some("clothing")).with_order(1),
            Node::tag("skirt", "短裙", Some("lower-body")).with_order(0),
            Node::folder("shoes", "鞋", None).with_order(2),
            Node::tag("loafers", "乐福鞋", Some("shoes")).with_order(0),
            Node::tag("stockings", "丝袜", None).with_order(3),
            Node::tag("black-stockings", "黑丝", Some("stockings")).with_order(0),
        ];

        Self {
            meta: Some(TaxonomyMeta {
                name: Some("Sample".to_string()),
                description: Some("Sample taxonomy".to_string()),
                ..Default::default()
            }),
            ..Self::new(nodes)
        }
    }

    /// Get a node by ID
    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Format a timestamp as RFC 3339, falling back to unix seconds for
/// instants RFC 3339 cannot represent
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
