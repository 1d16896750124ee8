use crate::classify::classify_node_type;
use crate::workflow::NodeDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Node-type namespace of the built-in integrations.
pub const DEFAULT_VENDOR_PREFIX: &str = "n8n-nodes-base.";

/// What starts a workflow's execution.
///
/// Variants are declared in ascending priority, so `Ord` encodes the
/// classification order `Webhook > Scheduled > Triggered > Manual`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TriggerType {
    #[default]
    Manual,
    Triggered,
    Scheduled,
    Webhook,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Manual => "Manual",
            TriggerType::Triggered => "Triggered",
            TriggerType::Scheduled => "Scheduled",
            TriggerType::Webhook => "Webhook",
        }
    }

    /// Whether the trigger contributes a token to the canonical filename.
    pub fn appears_in_filename(&self) -> bool {
        !matches!(self, TriggerType::Manual | TriggerType::Triggered)
    }

    /// The trigger classification a single node type indicates, if any.
    pub fn signal(node_type: &str) -> Option<TriggerType> {
        let lowered = node_type.to_lowercase();
        if ["webhook", "http"].iter().any(|k| lowered.contains(k)) {
            Some(TriggerType::Webhook)
        } else if ["cron", "schedule", "interval"]
            .iter()
            .any(|k| lowered.contains(k))
        {
            Some(TriggerType::Scheduled)
        } else if lowered.contains("trigger") {
            Some(TriggerType::Triggered)
        } else {
            None
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the inspector learned about a node list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphInspection {
    /// Canonical integration names, sorted lexicographically.
    pub services: BTreeSet<String>,
    pub trigger_type: TriggerType,
    pub has_credentials: bool,
}

/// Extracts integrations, the dominant trigger and credential usage from nodes.
#[derive(Debug, Clone)]
pub struct NodeGraphInspector {
    vendor_prefix: String,
}

impl Default for NodeGraphInspector {
    fn default() -> Self {
        Self::new(DEFAULT_VENDOR_PREFIX)
    }
}

impl NodeGraphInspector {
    pub fn new(vendor_prefix: impl Into<String>) -> Self {
        Self {
            vendor_prefix: vendor_prefix.into(),
        }
    }

    pub fn vendor_prefix(&self) -> &str {
        &self.vendor_prefix
    }

    /// Walks the nodes once. The result does not depend on node order: the
    /// trigger only ever moves up the priority ladder.
    pub fn inspect(&self, nodes: &[NodeDescriptor]) -> GraphInspection {
        let mut inspection = GraphInspection::default();

        for node in nodes {
            if let Some(signal) = TriggerType::signal(&node.node_type) {
                inspection.trigger_type = inspection.trigger_type.max(signal);
            }

            if let Some(service) = classify_node_type(&node.node_type, &self.vendor_prefix) {
                inspection.services.insert(service);
            }

            inspection.has_credentials |= node.has_credentials();
        }

        inspection
    }
}
