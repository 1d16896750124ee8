use super::definition::{ConnectionGraph, NodeDescriptor, WorkflowDocument};
use crate::error::WorkflowError;
use serde_json::Value;

impl WorkflowDocument {
    /// Decodes raw file bytes into a document.
    ///
    /// Fails on undecodable bytes, invalid JSON, or a non-object root. Everything
    /// past that point is tolerated: absent or malformed members degrade to
    /// `None` or defaults instead of failing the whole document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, WorkflowError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| WorkflowError::JsonParseError(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_json(json: &str) -> Result<Self, WorkflowError> {
        Self::from_slice(json.as_bytes())
    }

    pub fn from_value(value: Value) -> Result<Self, WorkflowError> {
        let Value::Object(mut root) = value else {
            return Err(WorkflowError::NotAnObject(describe_kind(&value).to_string()));
        };

        let name = match root.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        };
        let nodes = root.remove("nodes").map(parse_nodes);
        let connections = root.remove("connections").map(parse_connections);

        Ok(Self {
            name,
            nodes,
            connections,
        })
    }
}

fn parse_nodes(value: Value) -> Vec<NodeDescriptor> {
    match value {
        Value::Array(items) => items.into_iter().map(parse_node).collect(),
        _ => Vec::new(),
    }
}

/// Reads each member on its own, so one ill-typed member does not discard the
/// others. A missing or non-string `type` makes an untyped node.
fn parse_node(value: Value) -> NodeDescriptor {
    let Value::Object(mut node) = value else {
        return NodeDescriptor::default();
    };

    NodeDescriptor {
        node_type: match node.remove("type") {
            Some(Value::String(node_type)) => node_type,
            _ => String::new(),
        },
        name: match node.remove("name") {
            Some(Value::String(name)) => Some(name),
            _ => None,
        },
        credentials: node.remove("credentials"),
    }
}

fn parse_connections(value: Value) -> ConnectionGraph {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed connection graph: {}", e);
        ConnectionGraph::default()
    })
}

fn describe_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
