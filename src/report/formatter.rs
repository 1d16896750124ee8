use crate::analyzer::AnalysisReport;
use crate::ingest::{BatchSummary, CorpusStats, IngestAction, IngestOutcome};
use itertools::Itertools;
use std::path::Path;

const RULE_WIDTH: usize = 80;

/// Formats analysis results and ingestion summaries for terminal output.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Full analysis of one workflow, with the suggested filename.
    pub fn format_analysis(report: &AnalysisReport) -> String {
        let mut out = String::new();
        Self::push_rule(&mut out);
        out.push_str("NEW WORKFLOW ANALYSIS\n");
        Self::push_rule(&mut out);

        out.push_str(&format!("Original File: {}\n", report.original_filename));
        out.push_str(&format!("Workflow Name: {}\n", report.workflow_name));
        out.push_str(&format!(
            "Next Number: {:04}\n",
            report.next_sequence_number
        ));

        out.push_str("\nANALYSIS RESULTS:\n");
        Self::push_details(&mut out, report);
        out.push_str(&format!(
            "   Uses Credentials: {}\n",
            if report.has_credentials { "Yes" } else { "No" }
        ));

        out.push_str("\nSUGGESTED FILENAME:\n");
        out.push_str(&format!("   {}\n", report.suggested_filename));
        Self::push_rule(&mut out);
        out
    }

    /// What an add is about to do, shown before asking for confirmation.
    pub fn format_preview(source: &Path, report: &AnalysisReport, target: &Path) -> String {
        let mut out = String::new();
        Self::push_rule(&mut out);
        out.push_str("NEW WORKFLOW ADDITION PREVIEW\n");
        Self::push_rule(&mut out);

        out.push_str(&format!("Source File: {}\n", report.original_filename));
        out.push_str(&format!("Full Path: {}\n", source.display()));
        out.push_str(&format!("Workflow Name: {}\n", report.workflow_name));

        out.push_str("\nANALYSIS:\n");
        out.push_str(&format!(
            "   Will be numbered: {:04}\n",
            report.next_sequence_number
        ));
        Self::push_details(&mut out, report);

        out.push_str("\nNEW FILENAME:\n");
        out.push_str(&format!("   {}\n", report.suggested_filename));
        out.push_str("\nWILL BE SAVED TO:\n");
        out.push_str(&format!("   {}\n", target.display()));
        Self::push_rule(&mut out);
        out
    }

    /// One-line result of a single ingestion.
    pub fn format_outcome(outcome: &IngestOutcome) -> String {
        match outcome.action {
            IngestAction::DryRun => format!(
                "DRY RUN: Would copy '{}' to '{}'",
                outcome.source_path.display(),
                outcome.target_path.display()
            ),
            _ => format!(
                "Added '{}' as '{}' ({})",
                outcome.source_path.display(),
                outcome.target_filename,
                outcome.target_path.display()
            ),
        }
    }

    pub fn format_batch(summary: &BatchSummary) -> String {
        let mut out = String::from("BATCH PROCESSING SUMMARY:\n");
        for record in &summary.results {
            match (&record.target_filename, &record.error) {
                (_, Some(error)) => {
                    out.push_str(&format!("   FAILED  {}: {}\n", record.source_file, error))
                }
                (Some(target), None) => {
                    out.push_str(&format!("   OK      {} -> {}\n", record.source_file, target))
                }
                (None, None) => out.push_str(&format!("   OK      {}\n", record.source_file)),
            }
        }
        out.push_str(&format!("   Successful: {}\n", summary.successful));
        out.push_str(&format!("   Failed: {}\n", summary.failed));
        out.push_str(&format!("   Total: {}\n", summary.total_files));
        out
    }

    pub fn format_stats(stats: &CorpusStats) -> String {
        format!(
            "Next available number: {:04}\nExisting workflows: {}\nLast number: {:04}\n",
            stats.next_available_number, stats.total_existing, stats.last_number
        )
    }

    fn push_details(out: &mut String, report: &AnalysisReport) {
        let services = if report.services.is_empty() {
            "None detected".to_string()
        } else {
            report.services.iter().join(", ")
        };
        out.push_str(&format!("   Services: {}\n", services));
        out.push_str(&format!("   Purpose: {}\n", report.purpose));
        out.push_str(&format!("   Trigger: {}\n", report.trigger_type));
        out.push_str(&format!(
            "   Nodes: {} ({})\n",
            report.node_count, report.complexity
        ));
    }

    fn push_rule(out: &mut String) {
        out.push_str(&"=".repeat(RULE_WIDTH));
        out.push('\n');
    }
}
