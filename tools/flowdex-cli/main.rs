use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use flowdex::prelude::{
    AnalysisReport, AnalysisResponse, CatalogConfig, Confirmation, IngestOptions, IngestRecord,
    Ingestor, ReportFormatter,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Analyze workflow files and add them to the corpus under canonical names
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the existing workflows
    #[arg(long, global = true)]
    workflows_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a workflow file and suggest its canonical filename
    Analyze {
        /// Path to the workflow JSON file to analyze
        file: PathBuf,

        /// Only print the suggested filename
        #[arg(short, long)]
        quiet: bool,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add workflow files to the corpus
    Add(AddArgs),
    /// Show the corpus numbering state
    Stats {
        /// Print the stats as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    /// Workflow JSON files to add
    files: Vec<PathBuf>,

    /// Auto-confirm all operations
    #[arg(short = 'y', long)]
    auto_confirm: bool,

    /// Show what would be done without making changes
    #[arg(short, long)]
    dry_run: bool,

    /// Scan a directory for workflow files to add
    #[arg(short, long, value_name = "DIR")]
    scan: Option<PathBuf>,

    /// List workflow files in a directory that could be added
    #[arg(short, long, value_name = "DIR")]
    list_pending: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

/// Shows the add preview and asks on the terminal.
struct PromptConfirmation;

impl Confirmation for PromptConfirmation {
    fn confirm(&self, source: &Path, report: &AnalysisReport, target: &Path) -> bool {
        print!("{}", ReportFormatter::format_preview(source, report, target));
        ask_yes_no("\nProceed with adding this workflow?")
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\nError: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_config(cli: &Cli) -> Result<CatalogConfig> {
    let config = match &cli.config {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::default(),
    };
    let config = config.with_env_overrides();
    Ok(match &cli.workflows_dir {
        Some(dir) => config.with_workflows_dir(dir),
        None => config,
    })
}

/// Returns whether the command succeeded.
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(&cli)?;
    let ingestor = Ingestor::builder(config)
        .with_confirmation(Box::new(PromptConfirmation))
        .build()
        .context("Failed to open the workflow corpus")?;

    match cli.command {
        Command::Analyze { file, quiet, json } => run_analyze(&ingestor, &file, quiet, json),
        Command::Add(args) => run_add(&ingestor, args),
        Command::Stats { json } => {
            let stats = ingestor.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", ReportFormatter::format_stats(&stats));
            }
            Ok(true)
        }
    }
}

fn run_analyze(ingestor: &Ingestor, file: &Path, quiet: bool, json: bool) -> Result<bool> {
    if !file.exists() {
        bail!("File '{}' not found.", file.display());
    }

    let result = ingestor.analyze(file);
    if json {
        let response = AnalysisResponse::from(result);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(response.success);
    }

    let report = result?;
    if quiet {
        println!("{}", report.suggested_filename);
    } else {
        print!("{}", ReportFormatter::format_analysis(&report));
    }
    Ok(true)
}

fn run_add(ingestor: &Ingestor, args: AddArgs) -> Result<bool> {
    let options = IngestOptions {
        auto_confirm: args.auto_confirm,
        dry_run: args.dry_run,
    };

    if let Some(dir) = &args.list_pending {
        let pending = ingestor.list_pending(dir);
        if pending.is_empty() {
            println!("No potential workflow files found.");
        } else {
            println!("Found {} potential workflow files to add:", pending.len());
            for (i, path) in pending.iter().enumerate() {
                println!("   {}. {}", i + 1, display_name(path));
            }
        }
        return Ok(true);
    }

    if let Some(dir) = &args.scan {
        let pending = ingestor.list_pending(dir);
        if pending.is_empty() {
            println!("No workflow files found in '{}'.", dir.display());
            return Ok(true);
        }
        println!(
            "Found {} workflow files in '{}' to add.",
            pending.len(),
            dir.display()
        );
        if !args.auto_confirm && !args.dry_run && !ask_yes_no("Add all found workflows?") {
            println!("Operation cancelled.");
            return Ok(false);
        }
        // The batch question above stands in for the per-file prompt.
        let batch_options = IngestOptions {
            auto_confirm: true,
            ..options
        };
        return report_batch(ingestor, &pending, &batch_options, args.json);
    }

    if args.files.is_empty() {
        bail!("No workflow files given. Pass files, --scan <DIR> or --list-pending <DIR>.");
    }

    let errors: Vec<String> = args
        .files
        .iter()
        .filter_map(|file| ingestor.validate(file).err())
        .map(|e| e.to_string())
        .collect();
    if !errors.is_empty() {
        eprintln!("Error: The following file issues were found:");
        for error in errors {
            eprintln!("   - {}", error);
        }
        return Ok(false);
    }

    if let [file] = args.files.as_slice() {
        let result = ingestor.ingest(file, &options);
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&IngestRecord::new(file, &result))?
            );
            return Ok(result.is_ok());
        }
        let outcome = result?;
        println!("{}", ReportFormatter::format_outcome(&outcome));
        return Ok(true);
    }

    report_batch(ingestor, &args.files, &options, args.json)
}

fn report_batch(
    ingestor: &Ingestor,
    files: &[PathBuf],
    options: &IngestOptions,
    json: bool,
) -> Result<bool> {
    if !json {
        println!("Processing {} workflow files...", files.len());
    }
    let summary = ingestor.ingest_many(files, options);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("\n{}", ReportFormatter::format_batch(&summary));
    }
    Ok(summary.success)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// A helper function to prompt the user for a yes/no answer. Anything other
/// than `y`/`yes` (including a read failure) counts as no.
fn ask_yes_no(question: &str) -> bool {
    print!("{} (yes/no): ", question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
