//! Unit tests for errors, configuration, formatting and the reindex guard.
mod common;
use common::*;
use flowdex::config::WORKFLOWS_DIR_ENV;
use flowdex::prelude::*;
use std::fs;
use std::sync::Barrier;
use std::sync::mpsc;
use std::thread;

#[test]
fn test_error_display() {
    let err = IngestError::Collision("0001_Slack_Send.json".to_string());
    assert!(err.to_string().contains("0001_Slack_Send.json"));
    assert!(err.to_string().contains("already exists"));

    let err = IngestError::Incomplete("flow.json".to_string());
    assert!(err.to_string().contains("missing 'nodes' or 'connections'"));

    let err = IngestError::Malformed {
        path: "flow.json".to_string(),
        source: WorkflowError::NotAnObject("an array".to_string()),
    };
    assert!(err.to_string().contains("flow.json"));
    assert!(err.to_string().contains("an array"));

    let err = AnalysisError::Unreadable {
        path: "gone.json".to_string(),
        message: "No such file or directory".to_string(),
    };
    assert!(err.to_string().contains("gone.json"));

    assert_eq!(
        ReindexError::AlreadyRunning.to_string(),
        "A reindex is already in progress"
    );
}

#[test]
fn test_trigger_and_complexity_display() {
    assert_eq!(TriggerType::Webhook.to_string(), "Webhook");
    assert_eq!(Complexity::Standard.to_string(), "Standard");
    assert!(TriggerType::Webhook > TriggerType::Scheduled);
    assert!(TriggerType::Scheduled > TriggerType::Triggered);
    assert!(TriggerType::Triggered > TriggerType::Manual);
    assert!(!TriggerType::Triggered.appears_in_filename());
    assert!(TriggerType::Scheduled.appears_in_filename());
}

#[test]
fn test_config_defaults_and_file() {
    let config = CatalogConfig::default();
    assert_eq!(config.workflows_dir, PathBuf::from("workflows"));
    assert!(config.accepts_extension(Path::new("a.JSON")));
    assert!(!config.accepts_extension(Path::new("a.yaml")));
    assert!(!config.accepts_extension(Path::new("json")));

    let sandbox = Sandbox::new();
    let path = sandbox.root.path().join("flowdex.json");
    fs::write(&path, r#"{ "workflows_dir": "corpus", "extensions": ["json", "n8n"] }"#).unwrap();
    let loaded = CatalogConfig::from_file(&path).unwrap();
    assert_eq!(loaded.workflows_dir, PathBuf::from("corpus"));
    assert!(loaded.accepts_extension(Path::new("flow.n8n")));
    assert_eq!(loaded.vendor_prefix, "n8n-nodes-base.");

    fs::write(&path, "not json").unwrap();
    assert!(matches!(
        CatalogConfig::from_file(&path),
        Err(ConfigError::Invalid { .. })
    ));
    assert!(matches!(
        CatalogConfig::from_file(sandbox.root.path().join("missing.json")),
        Err(ConfigError::Unreadable { .. })
    ));
}

#[test]
fn test_config_env_override() {
    // Only this test touches the variable.
    unsafe { std::env::set_var(WORKFLOWS_DIR_ENV, "/tmp/flowdex-corpus") };
    let config = CatalogConfig::default().with_env_overrides();
    unsafe { std::env::remove_var(WORKFLOWS_DIR_ENV) };
    assert_eq!(config.workflows_dir, PathBuf::from("/tmp/flowdex-corpus"));
}

#[test]
fn test_formatter_analysis() {
    let bytes = serde_json::to_vec(&github_discord_workflow()).unwrap();
    let report = WorkflowAnalyzer::default()
        .analyze_bytes(&SequenceRegistry::from_numbers([41]), &bytes, "flow.json")
        .unwrap();

    let text = ReportFormatter::format_analysis(&report);
    assert!(text.contains("Next Number: 0042"));
    assert!(text.contains("Services: Discord, GitHub, Gmail, Webhook"));
    assert!(text.contains("Trigger: Webhook"));
    assert!(text.contains("Uses Credentials: No"));
    assert!(text.contains("0042_Discord_GitHub_Send_Webhook.json"));

    let preview = ReportFormatter::format_preview(
        Path::new("incoming/flow.json"),
        &report,
        Path::new("workflows/0042_Discord_GitHub_Send_Webhook.json"),
    );
    assert!(preview.contains("Will be numbered: 0042"));
    assert!(preview.contains("workflows/0042_Discord_GitHub_Send_Webhook.json"));
}

#[test]
fn test_formatter_batch_and_stats() {
    let sandbox = Sandbox::new();
    let good = sandbox.write_source("good.json", &slack_workflow());
    let bad = sandbox.write_raw_source("bad.json", "[");
    let ingestor = Ingestor::open(CatalogConfig::new(sandbox.corpus())).unwrap();
    let summary = ingestor.ingest_many(&[good, bad], &IngestOptions::dry_run());

    let text = ReportFormatter::format_batch(&summary);
    assert!(text.contains("Successful: 1"));
    assert!(text.contains("Failed: 1"));
    assert!(text.contains("Total: 2"));
    assert!(text.contains("0001_Manual_Slack_Send.json"));

    let stats = ReportFormatter::format_stats(&ingestor.stats());
    assert!(stats.contains("Next available number: 0001"));
    assert!(stats.contains("Existing workflows: 0"));
}

#[test]
fn test_reindex_guard_runs_job() {
    let guard = ReindexGuard::new();
    let result: std::result::Result<usize, ReindexError> =
        guard.run(|| Ok::<_, String>(3));
    assert_eq!(result, Ok(3));
    assert!(!guard.is_running());

    let failed = guard.run(|| Err::<(), _>("disk full"));
    assert_eq!(failed, Err(ReindexError::Failed("disk full".to_string())));
    assert!(!guard.is_running());
}

#[test]
fn test_reindex_guard_rejects_second_trigger() {
    let guard = ReindexGuard::new();
    let ticket = guard.try_begin().unwrap();
    assert!(guard.is_running());
    assert_eq!(
        guard.run(|| Ok::<_, String>(())),
        Err(ReindexError::AlreadyRunning)
    );
    drop(ticket);
    assert!(guard.try_begin().is_ok());
}

#[test]
fn test_reindex_guard_across_threads() {
    let guard = ReindexGuard::new();
    let started = Barrier::new(2);
    let (release_tx, release_rx) = mpsc::channel::<()>();

    thread::scope(|scope| {
        let (guard, started) = (&guard, &started);
        let worker = scope.spawn(move || {
            guard.run(|| {
                started.wait();
                release_rx.recv().map_err(|e| e.to_string())
            })
        });

        started.wait();
        assert_eq!(
            guard.run(|| Ok::<_, String>(())),
            Err(ReindexError::AlreadyRunning)
        );
        release_tx.send(()).unwrap();
        assert_eq!(worker.join().unwrap(), Ok(()));
    });
    assert!(!guard.is_running());
}
