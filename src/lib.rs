//! # Flowdex - Workflow Catalog Engine
//!
//! **Flowdex** statically inspects workflow-definition files (JSON documents
//! describing automation graphs of nodes and connections), infers what they
//! integrate with, what starts them and what they are for, and files them into
//! a corpus under a canonical, collision-free `NNNN_Service_Purpose_Trigger.json`
//! name. Workflows are never executed, only read.
//!
//! ## Core Workflow
//!
//! 1.  **Scan the corpus**: `SequenceRegistry::scan` collects the sequence numbers already in use.
//! 2.  **Analyze**: `WorkflowAnalyzer` classifies the nodes, infers the purpose and builds the
//!     suggested filename from the registry's next free number. Analysis never mutates anything.
//! 3.  **Ingest**: `Ingestor` validates a source file, re-runs the analysis under its registry lock,
//!     refuses collisions, copies the file into the corpus and only then commits the number.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowdex::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let ingestor = Ingestor::open(CatalogConfig::new("workflows"))?;
//!
//!     // Preview the canonical name without touching the corpus.
//!     let report = ingestor.analyze(Path::new("incoming/my_flow.json"))?;
//!     println!("{} -> {}", report.original_filename, report.suggested_filename);
//!
//!     // Copy it in under that name.
//!     let outcome = ingestor.ingest(
//!         Path::new("incoming/my_flow.json"),
//!         &IngestOptions::auto_confirmed(),
//!     )?;
//!     println!("Added as {}", outcome.target_filename);
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod ingest;
pub mod inspect;
pub mod naming;
pub mod numbering;
pub mod prelude;
pub mod purpose;
pub mod reindex;
pub mod report;
pub mod workflow;
