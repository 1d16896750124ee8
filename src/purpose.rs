use crate::workflow::NodeDescriptor;

/// Purpose returned when neither the name nor the nodes give a hint.
pub const FALLBACK_PURPOSE: &str = "Automation";

/// Purpose categories and their name keywords. The first matching category wins.
pub const PURPOSE_KEYWORDS: &[(&str, &[&str])] = &[
    ("Create", &["create", "add", "new", "generate", "build", "make"]),
    ("Update", &["update", "modify", "change", "edit", "patch", "refresh"]),
    ("Sync", &["sync", "synchronize", "mirror", "replicate", "match"]),
    ("Send", &["send", "email", "message", "notify", "alert", "push"]),
    ("Import", &["import", "load", "fetch", "get", "retrieve", "pull"]),
    ("Export", &["export", "save", "backup", "archive", "download"]),
    ("Monitor", &["monitor", "check", "watch", "track", "status", "health"]),
    ("Process", &["process", "transform", "convert", "parse", "analyze"]),
    ("Automate", &["automate", "workflow", "bot", "automation", "routine"]),
    ("Manage", &["manage", "organize", "admin", "control", "handle"]),
];

/// Substrings of node types consulted when the name has no keyword.
const NODE_TYPE_HINTS: &[(&str, &[&str])] = &[
    ("Create", &["create", "add"]),
    ("Update", &["update", "edit"]),
    ("Send", &["send", "email", "message"]),
];

/// Infers a one-word purpose for a workflow.
///
/// Keywords are matched as substrings of the lower-cased display name, so
/// `"Address book"` counts as `Create` through `add`.
pub fn infer_purpose(display_name: &str, nodes: &[NodeDescriptor]) -> &'static str {
    let name = display_name.to_lowercase();
    if let Some(purpose) = first_match(PURPOSE_KEYWORDS, |keyword| name.contains(keyword)) {
        return purpose;
    }

    let node_types: Vec<String> = nodes.iter().map(|n| n.node_type.to_lowercase()).collect();
    first_match(NODE_TYPE_HINTS, |hint| {
        node_types.iter().any(|node_type| node_type.contains(hint))
    })
    .unwrap_or(FALLBACK_PURPOSE)
}

fn first_match(
    table: &[(&'static str, &[&str])],
    matches: impl Fn(&str) -> bool,
) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| matches(k)))
        .map(|(purpose, _)| *purpose)
}
