//! Tests for purpose inference, numbering and filename synthesis.
mod common;
use common::*;
use flowdex::naming::sanitize_stem;
use flowdex::prelude::*;
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_purpose_from_name_keywords() {
    let cases = [
        ("Create new user", "Create"),
        ("Update customer records", "Update"),
        ("Sync data between systems", "Sync"),
        ("Send notification emails", "Send"),
        ("Import CSV data", "Import"),
        ("Export reports", "Export"),
        ("Monitor system health", "Monitor"),
        ("Process incoming data", "Process"),
        ("Automate daily tasks", "Automate"),
        ("Manage user accounts", "Manage"),
    ];
    for (name, expected) in cases {
        assert_eq!(infer_purpose(name, &[]), expected, "name: {}", name);
    }
}

#[test]
fn test_purpose_first_category_wins() {
    // "create" and "send" both match; Create is declared first.
    assert_eq!(infer_purpose("Create and send invoices", &[]), "Create");
}

#[test]
fn test_purpose_falls_back_to_node_types() {
    let create = vec![NodeDescriptor::new("n8n-nodes-base.createRecord")];
    assert_eq!(infer_purpose("Xyz", &create), "Create");

    let update = vec![NodeDescriptor::new("n8n-nodes-base.editImage")];
    assert_eq!(infer_purpose("Xyz", &update), "Update");

    let send = vec![NodeDescriptor::new("n8n-nodes-base.emailSend")];
    assert_eq!(infer_purpose("Xyz", &send), "Send");

    assert_eq!(infer_purpose("Xyz", &[]), "Automation");
}

#[test]
fn test_numbering_continues_after_highest_number() {
    let sandbox = Sandbox::new();
    sandbox.seed_corpus("0001_Slack_Send.json");
    sandbox.seed_corpus("0002_Gmail_Import.json");
    sandbox.seed_corpus("0005_Discord_Create_Webhook.json");

    let mut registry = SequenceRegistry::scan(&sandbox.corpus()).unwrap();
    assert_eq!(registry.used_numbers(), vec![1, 2, 5]);
    assert_eq!(registry.peek_next(), 6);
    assert_eq!(registry.peek_next(), 6);

    registry.commit(6);
    assert_eq!(registry.peek_next(), 7);
    assert_eq!(registry.last_number(), Some(6));
}

#[test]
fn test_numbering_ignores_foreign_names() {
    let sandbox = Sandbox::new();
    sandbox.seed_corpus("0003_Slack_Send.json");
    sandbox.seed_corpus("readme.json");
    sandbox.seed_corpus("12_short.json");
    sandbox.seed_corpus("00042_five_digits.json");
    sandbox.seed_corpus("0099_not_json.txt");

    let registry = SequenceRegistry::scan(&sandbox.corpus()).unwrap();
    assert_eq!(registry.used_numbers(), vec![3]);
    assert_eq!(registry.peek_next(), 4);
}

#[test]
fn test_numbering_on_missing_directory_starts_at_one() {
    let sandbox = Sandbox::new();
    let registry = SequenceRegistry::scan(&sandbox.root.path().join("nope")).unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.peek_next(), 1);
}

#[test]
fn test_commit_below_maximum_keeps_next_number() {
    let mut registry = SequenceRegistry::from_numbers([1, 10]);
    assert_eq!(registry.peek_next(), 11);
    registry.commit(4);
    assert!(registry.contains(4));
    assert_eq!(registry.peek_next(), 11);
}

#[test]
fn test_sequence_number_parsing() {
    assert_eq!(SequenceRegistry::sequence_number("0042_Slack.json"), Some(42));
    assert_eq!(SequenceRegistry::sequence_number("0000_Zero.json"), Some(0));
    assert_eq!(SequenceRegistry::sequence_number("42_Slack.json"), None);
    assert_eq!(SequenceRegistry::sequence_number("abcd_Slack.json"), None);
}

#[test]
fn test_filename_single_service() {
    let name = synthesize(1, &set(&["Slack"]), "Send", TriggerType::Triggered);
    assert_eq!(name, "0001_Slack_Send.json");
}

#[test]
fn test_filename_services_sorted_and_limited() {
    let name = synthesize(
        5,
        &set(&["GitHub", "Discord", "Webhook"]),
        "Notify",
        TriggerType::Webhook,
    );
    assert_eq!(name, "0005_Discord_GitHub_Notify_Webhook.json");

    let unsorted = synthesize(5, ["Zoom", "Airtable"], "Sync", TriggerType::Scheduled);
    assert_eq!(unsorted, "0005_Airtable_Zoom_Sync_Scheduled.json");
}

#[test]
fn test_filename_without_services() {
    let name = synthesize(10, &BTreeSet::<String>::new(), "Process", TriggerType::Manual);
    assert_eq!(name, "0010_Manual_Process.json");
}

#[test]
fn test_filename_strips_unsafe_characters() {
    let name = synthesize(
        3,
        &set(&["Sl@ck#", "Git$Hub%"]),
        "Se&nd/../",
        TriggerType::Webhook,
    );
    for c in ['@', '#', '$', '%', '&', '/', '.'] {
        assert!(!name.trim_end_matches(".json").contains(c), "{} in {}", c, name);
    }
    assert!(name.ends_with(".json"));
    assert!(name[..4].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(name, "0003_GitHub_Slck_Send_Webhook.json");
}

#[test]
fn test_sanitize_collapses_and_trims_underscores() {
    assert_eq!(sanitize_stem("__0001__@@_Send__"), "0001_Send");
    assert_eq!(sanitize_stem("a b-c"), "ab-c");
}
