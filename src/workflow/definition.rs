use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A workflow definition as read from disk.
///
/// `nodes` and `connections` are `None` when the key is absent from the source
/// document, which keeps "incomplete" distinguishable from "empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkflowDocument {
    pub name: Option<String>,
    pub nodes: Option<Vec<NodeDescriptor>>,
    pub connections: Option<ConnectionGraph>,
}

impl WorkflowDocument {
    /// The declared nodes, or an empty slice when the document has none.
    pub fn nodes(&self) -> &[NodeDescriptor] {
        self.nodes.as_deref().unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// True when both the `nodes` and `connections` keys were present.
    pub fn is_complete(&self) -> bool {
        self.nodes.is_some() && self.connections.is_some()
    }

    /// Number of edges declared in the connection graph.
    pub fn connection_count(&self) -> usize {
        self.connections.as_ref().map_or(0, ConnectionGraph::edge_count)
    }
}

/// A single declared step in the workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
}

impl NodeDescriptor {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: None,
            credentials: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Value) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// A node uses credentials when its `credentials` member is present and non-empty.
    pub fn has_credentials(&self) -> bool {
        match &self.credentials {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
        }
    }
}

/// Outgoing connections of a workflow, keyed by source node name.
///
/// Each source maps a port type (usually `"main"`) to its ordered output ports,
/// and each port holds the ordered list of edges leaving it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionGraph {
    pub sources: BTreeMap<String, BTreeMap<String, Vec<Vec<Edge>>>>,
}

impl ConnectionGraph {
    pub fn edge_count(&self) -> usize {
        self.sources
            .values()
            .flat_map(|ports| ports.values())
            .flatten()
            .map(Vec::len)
            .sum()
    }

    /// All edges leaving `source`, across every port type and output index.
    pub fn edges_from<'a>(&'a self, source: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.sources
            .get(source)
            .into_iter()
            .flat_map(|ports| ports.values())
            .flatten()
            .flatten()
    }
}

/// A connection into `node` on the given port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub node: String,
    #[serde(rename = "type", default = "default_port_type")]
    pub port_type: String,
    #[serde(default)]
    pub index: u32,
}

fn default_port_type() -> String {
    "main".to_string()
}
