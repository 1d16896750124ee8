use crate::analyzer::AnalysisReport;
use crate::error::IngestError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What an ingestion attempt did to the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestAction {
    Added,
    DryRun,
    Failed,
}

/// Flags controlling a single ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Skip the interactive confirmation step.
    pub auto_confirm: bool,
    /// Report the target name without writing anything.
    pub dry_run: bool,
}

impl IngestOptions {
    pub fn auto_confirmed() -> Self {
        Self {
            auto_confirm: true,
            dry_run: false,
        }
    }

    pub fn dry_run() -> Self {
        Self {
            auto_confirm: true,
            dry_run: true,
        }
    }
}

/// A successful ingestion, either performed or simulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub action: IngestAction,
    pub source_path: PathBuf,
    pub target_filename: String,
    pub target_path: PathBuf,
    pub analysis: AnalysisReport,
}

impl IngestOutcome {
    /// True when a file was added and any search index over the corpus is stale.
    pub fn corpus_changed(&self) -> bool {
        self.action == IngestAction::Added
    }
}

/// Serializable per-file result, used for reporting and batch summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRecord {
    pub success: bool,
    pub action: IngestAction,
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisReport>,
}

impl IngestRecord {
    pub fn new(source: &Path, result: &Result<IngestOutcome, IngestError>) -> Self {
        match result {
            Ok(outcome) => Self {
                success: true,
                action: outcome.action,
                source_file: source.display().to_string(),
                target_filename: Some(outcome.target_filename.clone()),
                target_path: Some(outcome.target_path.display().to_string()),
                error: None,
                analysis: Some(outcome.analysis.clone()),
            },
            Err(e) => Self {
                success: false,
                action: IngestAction::Failed,
                source_file: source.display().to_string(),
                target_filename: None,
                target_path: None,
                error: Some(e.to_string()),
                analysis: None,
            },
        }
    }
}

/// Result of ingesting several files in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// True only when no file failed.
    pub success: bool,
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<IngestRecord>,
}

impl BatchSummary {
    pub fn from_records(results: Vec<IngestRecord>) -> Self {
        let successful = results.iter().filter(|r| r.success).count();
        let failed = results.len() - successful;
        Self {
            success: failed == 0,
            total_files: results.len(),
            successful,
            failed,
            results,
        }
    }

    pub fn corpus_changed(&self) -> bool {
        self.results.iter().any(|r| r.action == IngestAction::Added)
    }
}

/// Numbering state of the corpus as seen by an `Ingestor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub next_available_number: u32,
    pub total_existing: usize,
    /// Highest number in use, 0 for an empty corpus.
    pub last_number: u32,
}
