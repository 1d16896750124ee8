//! The ingestion coordinator: validates a candidate workflow file, names it,
//! and copies it into the corpus.
//!
//! Each ingestion runs `validate -> analyze -> confirm -> collision check ->
//! copy -> commit` while holding the registry lock, so concurrent callers on the
//! same `Ingestor` can never pick the same sequence number. The number is
//! committed only after the copy has been written and synced.

use crate::analyzer::{AnalysisReport, WorkflowAnalyzer};
use crate::config::CatalogConfig;
use crate::error::{AnalysisError, CorpusError, IngestError};
use crate::inspect::NodeGraphInspector;
use crate::numbering::{CORPUS_EXTENSION, SequenceRegistry};
use crate::workflow::WorkflowDocument;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

mod confirmation;
mod outcome;

pub use confirmation::{AlwaysConfirm, AlwaysDecline, Confirmation};
pub use outcome::{
    BatchSummary, CorpusStats, IngestAction, IngestOptions, IngestOutcome, IngestRecord,
};

/// A source file that passed validation, with the exact bytes that were checked.
#[derive(Debug, Clone)]
pub struct ValidatedSource {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub document: WorkflowDocument,
}

pub struct Ingestor {
    config: CatalogConfig,
    analyzer: WorkflowAnalyzer,
    registry: Mutex<SequenceRegistry>,
    confirmation: Box<dyn Confirmation>,
}

pub struct IngestorBuilder {
    config: CatalogConfig,
    confirmation: Box<dyn Confirmation>,
}

impl IngestorBuilder {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            confirmation: Box::new(AlwaysDecline),
        }
    }

    /// Sets who is asked before a non-auto-confirmed ingestion writes a file.
    pub fn with_confirmation(mut self, confirmation: Box<dyn Confirmation>) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// Creates the corpus directory if needed and scans its sequence numbers.
    pub fn build(self) -> Result<Ingestor, CorpusError> {
        let dir = &self.config.workflows_dir;
        fs::create_dir_all(dir).map_err(|e| CorpusError::CreateFailed {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let registry = SequenceRegistry::scan(dir)?;

        Ok(Ingestor {
            analyzer: WorkflowAnalyzer::new(NodeGraphInspector::new(
                self.config.vendor_prefix.clone(),
            )),
            registry: Mutex::new(registry),
            confirmation: self.confirmation,
            config: self.config,
        })
    }
}

impl Ingestor {
    pub fn builder(config: CatalogConfig) -> IngestorBuilder {
        IngestorBuilder::new(config)
    }

    pub fn open(config: CatalogConfig) -> Result<Self, CorpusError> {
        IngestorBuilder::new(config).build()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &WorkflowAnalyzer {
        &self.analyzer
    }

    // The registry is only written by the final commit, so a panic in another
    // holder cannot have left it half-updated.
    fn lock_registry(&self) -> MutexGuard<'_, SequenceRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The sequence number the next successful ingestion will use.
    pub fn peek_next(&self) -> u32 {
        self.lock_registry().peek_next()
    }

    pub fn stats(&self) -> CorpusStats {
        let registry = self.lock_registry();
        CorpusStats {
            next_available_number: registry.peek_next(),
            total_existing: registry.len(),
            last_number: registry.last_number().unwrap_or(0),
        }
    }

    /// Rebuilds the registry from the corpus directory.
    pub fn rescan(&self) -> Result<(), CorpusError> {
        let mut registry = self.lock_registry();
        *registry = SequenceRegistry::scan(&self.config.workflows_dir)?;
        Ok(())
    }

    /// Analyzes a file against the current corpus without changing anything.
    pub fn analyze(&self, source: &Path) -> Result<AnalysisReport, AnalysisError> {
        let registry = self.lock_registry();
        self.analyzer.analyze_file(&registry, source)
    }

    /// Checks that `source` exists, has an accepted extension, and decodes to a
    /// document carrying both `nodes` and `connections`.
    pub fn validate(&self, source: &Path) -> Result<ValidatedSource, IngestError> {
        let display = source.display().to_string();

        if !source.exists() {
            return Err(IngestError::NotFound(display));
        }
        if !self.config.accepts_extension(source) {
            return Err(IngestError::UnsupportedExtension(display));
        }

        let bytes = fs::read(source).map_err(|e| IngestError::Unreadable {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let document =
            WorkflowDocument::from_slice(&bytes).map_err(|source| IngestError::Malformed {
                path: display.clone(),
                source,
            })?;
        if !document.is_complete() {
            return Err(IngestError::Incomplete(display));
        }

        Ok(ValidatedSource {
            path: source.to_path_buf(),
            bytes,
            document,
        })
    }

    /// Adds one workflow file to the corpus under its canonical name.
    pub fn ingest(
        &self,
        source: &Path,
        options: &IngestOptions,
    ) -> Result<IngestOutcome, IngestError> {
        let mut registry = self.lock_registry();
        let result = self.ingest_locked(&mut registry, source, options);
        drop(registry);

        match &result {
            Ok(outcome) if outcome.corpus_changed() => tracing::info!(
                "Added '{}' as '{}'",
                source.display(),
                outcome.target_filename
            ),
            Ok(outcome) => tracing::info!(
                "Dry run: '{}' would be added as '{}'",
                source.display(),
                outcome.target_filename
            ),
            Err(e) => tracing::warn!("Rejected '{}': {}", source.display(), e),
        }
        result
    }

    fn ingest_locked(
        &self,
        registry: &mut SequenceRegistry,
        source: &Path,
        options: &IngestOptions,
    ) -> Result<IngestOutcome, IngestError> {
        let validated = self.validate(source)?;
        let original_filename = source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let analysis =
            self.analyzer
                .analyze_document(registry, &validated.document, &original_filename);
        let target_filename = analysis.suggested_filename.clone();
        let target_path = self.config.workflows_dir.join(&target_filename);

        if !options.auto_confirm
            && !options.dry_run
            && !self.ask(source, &analysis, &target_path)
        {
            return Err(IngestError::Cancelled);
        }

        if target_path.exists() {
            return Err(IngestError::Collision(target_filename));
        }

        if options.dry_run {
            return Ok(IngestOutcome {
                action: IngestAction::DryRun,
                source_path: source.to_path_buf(),
                target_filename,
                target_path,
                analysis,
            });
        }

        write_new_file(&target_path, &validated.bytes).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                IngestError::Collision(target_filename.clone())
            } else {
                IngestError::CopyFailed {
                    path: target_path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        registry.commit(analysis.next_sequence_number);

        Ok(IngestOutcome {
            action: IngestAction::Added,
            source_path: source.to_path_buf(),
            target_filename,
            target_path,
            analysis,
        })
    }

    /// Asks the confirmer. A panicking confirmer counts as a decline, so one bad
    /// answer cannot abort a batch or leave the registry lock poisoned.
    fn ask(&self, source: &Path, analysis: &AnalysisReport, target: &Path) -> bool {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.confirmation.confirm(source, analysis, target)
        }))
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Confirmation for '{}' panicked, treating it as declined",
                source.display()
            );
            false
        })
    }

    /// Ingests files one after another. A failure is recorded and the batch
    /// moves on to the next file.
    pub fn ingest_many<P: AsRef<Path>>(
        &self,
        sources: &[P],
        options: &IngestOptions,
    ) -> BatchSummary {
        let records = sources
            .iter()
            .map(|source| {
                let source = source.as_ref();
                let result = self.ingest(source, options);
                IngestRecord::new(source, &result)
            })
            .collect();
        let summary = BatchSummary::from_records(records);

        tracing::info!(
            "Batch finished: {} added, {} failed, {} total",
            summary.successful,
            summary.failed,
            summary.total_files
        );
        summary
    }

    /// Valid workflow files in `dir` that do not yet carry a sequence number.
    ///
    /// Only `*.json` names not starting with a digit are considered. A missing
    /// or unreadable directory yields nothing.
    pub fn list_pending(&self, dir: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(dir) else {
            return Vec::new();
        };

        let mut pending: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    return false;
                };
                let is_json = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(CORPUS_EXTENSION));
                is_json && !name.starts_with(|c: char| c.is_ascii_digit())
            })
            .filter(|path| match self.validate(path) {
                Ok(_) => true,
                Err(e) => {
                    tracing::debug!("Skipping '{}': {}", path.display(), e);
                    false
                }
            })
            .collect();

        pending.sort();
        pending
    }
}

/// Writes `bytes` to a file that must not exist yet. A partially written file
/// is removed before the error is returned.
fn write_new_file(target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;

    if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(target) {
            tracing::warn!(
                "Could not remove partial file '{}': {}",
                target.display(),
                cleanup
            );
        }
        return Err(e);
    }
    Ok(())
}
