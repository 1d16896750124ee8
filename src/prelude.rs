//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the
//! flowdex crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowdex::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let registry = SequenceRegistry::scan(Path::new("workflows"))?;
//! let analyzer = WorkflowAnalyzer::default();
//! let report = analyzer.analyze_file(&registry, Path::new("new_flow.json"))?;
//!
//! println!("{}", ReportFormatter::format_analysis(&report));
//! # Ok(())
//! # }
//! ```

// Analysis
pub use crate::analyzer::{AnalysisReport, AnalysisResponse, Complexity, WorkflowAnalyzer};
pub use crate::classify::classify;
pub use crate::inspect::{GraphInspection, NodeGraphInspector, TriggerType};
pub use crate::naming::synthesize;
pub use crate::numbering::SequenceRegistry;
pub use crate::purpose::infer_purpose;

// Workflow model
pub use crate::workflow::{ConnectionGraph, Edge, NodeDescriptor, WorkflowDocument};

// Ingestion
pub use crate::config::CatalogConfig;
pub use crate::ingest::{
    AlwaysConfirm, AlwaysDecline, BatchSummary, Confirmation, CorpusStats, IngestAction,
    IngestOptions, IngestOutcome, IngestRecord, Ingestor,
};
pub use crate::reindex::ReindexGuard;

// Error types
pub use crate::error::{
    AnalysisError, ConfigError, CorpusError, IngestError, ReindexError, WorkflowError,
};

// Formatting
pub use crate::report::ReportFormatter;

// Standard library re-exports commonly used with this crate
pub use std::path::{Path, PathBuf};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
