use crate::error::AnalysisError;
use crate::inspect::{NodeGraphInspector, TriggerType};
use crate::naming::synthesize;
use crate::numbering::{CORPUS_EXTENSION, SequenceRegistry};
use crate::purpose::infer_purpose;
use crate::workflow::WorkflowDocument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Size class of a workflow, derived from its node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Complexity {
    Simple,
    Standard,
    Complex,
}

impl Complexity {
    /// Up to 5 nodes is `Simple`, up to 15 `Standard`, anything larger `Complex`.
    pub fn from_node_count(node_count: usize) -> Self {
        match node_count {
            0..=5 => Complexity::Simple,
            6..=15 => Complexity::Standard,
            _ => Complexity::Complex,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Standard => "Standard",
            Complexity::Complex => "Complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the analyzer derives from one workflow document.
///
/// A report is a suggestion: producing one never touches the corpus or the
/// registry it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub original_filename: String,
    pub suggested_filename: String,
    pub workflow_name: String,
    /// Canonical integration names, sorted.
    pub services: BTreeSet<String>,
    pub purpose: String,
    pub trigger_type: TriggerType,
    pub node_count: usize,
    pub connection_count: usize,
    pub integrations_count: usize,
    /// The sequence number the suggested filename was built with.
    pub next_sequence_number: u32,
    pub complexity: Complexity,
    pub has_credentials: bool,
}

/// Wire shape of an analysis: `{"success": true, ...report}` or
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: Option<AnalysisReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<AnalysisReport, AnalysisError>> for AnalysisResponse {
    fn from(result: Result<AnalysisReport, AnalysisError>) -> Self {
        match result {
            Ok(report) => Self {
                success: true,
                report: Some(report),
                error: None,
            },
            Err(e) => Self {
                success: false,
                report: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Composes inspection, purpose inference, numbering and naming.
#[derive(Debug, Clone, Default)]
pub struct WorkflowAnalyzer {
    inspector: NodeGraphInspector,
}

impl WorkflowAnalyzer {
    pub fn new(inspector: NodeGraphInspector) -> Self {
        Self { inspector }
    }

    pub fn inspector(&self) -> &NodeGraphInspector {
        &self.inspector
    }

    /// Reads and analyzes a workflow file.
    pub fn analyze_file(
        &self,
        registry: &SequenceRegistry,
        path: &Path,
    ) -> Result<AnalysisReport, AnalysisError> {
        let bytes = fs::read(path).map_err(|e| AnalysisError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let original_filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.analyze_bytes(registry, &bytes, &original_filename)
    }

    /// Analyzes raw document bytes, e.g. an uploaded file's content.
    pub fn analyze_bytes(
        &self,
        registry: &SequenceRegistry,
        bytes: &[u8],
        original_filename: &str,
    ) -> Result<AnalysisReport, AnalysisError> {
        let document = WorkflowDocument::from_slice(bytes)?;
        Ok(self.analyze_document(registry, &document, original_filename))
    }

    /// Analyzes an already-decoded document. Missing `nodes` or `connections`
    /// are treated as empty.
    pub fn analyze_document(
        &self,
        registry: &SequenceRegistry,
        document: &WorkflowDocument,
        original_filename: &str,
    ) -> AnalysisReport {
        let workflow_name = document
            .name
            .clone()
            .unwrap_or_else(|| strip_corpus_extension(original_filename).to_string());
        let nodes = document.nodes();

        let inspection = self.inspector.inspect(nodes);
        let purpose = infer_purpose(&workflow_name, nodes);
        let next_sequence_number = registry.peek_next();
        let suggested_filename = synthesize(
            next_sequence_number,
            &inspection.services,
            purpose,
            inspection.trigger_type,
        );

        tracing::debug!(
            "Analyzed '{}': {} nodes, trigger {}, suggested '{}'",
            original_filename,
            nodes.len(),
            inspection.trigger_type,
            suggested_filename
        );

        AnalysisReport {
            original_filename: original_filename.to_string(),
            suggested_filename,
            workflow_name,
            integrations_count: inspection.services.len(),
            services: inspection.services,
            purpose: purpose.to_string(),
            trigger_type: inspection.trigger_type,
            node_count: nodes.len(),
            connection_count: document.connection_count(),
            next_sequence_number,
            complexity: Complexity::from_node_count(nodes.len()),
            has_credentials: inspection.has_credentials,
        }
    }
}

fn strip_corpus_extension(filename: &str) -> &str {
    filename
        .strip_suffix(&format!(".{}", CORPUS_EXTENSION))
        .unwrap_or(filename)
}
