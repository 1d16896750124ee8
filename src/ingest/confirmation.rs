use crate::analyzer::AnalysisReport;
use std::path::Path;

/// Asks whether an analyzed file should be added under its suggested name.
///
/// Only consulted when an ingestion is neither auto-confirmed nor a dry run.
/// A panic inside `confirm` is caught and treated as a decline.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, source: &Path, report: &AnalysisReport, target: &Path) -> bool;
}

/// Declines every request. The default for callers with nobody to ask.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysDecline;

impl Confirmation for AlwaysDecline {
    fn confirm(&self, _source: &Path, _report: &AnalysisReport, _target: &Path) -> bool {
        false
    }
}

/// Accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&self, _source: &Path, _report: &AnalysisReport, _target: &Path) -> bool {
        true
    }
}
