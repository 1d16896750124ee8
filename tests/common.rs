//! Common test utilities for building workflow documents and corpus directories.
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PREFIX: &str = "n8n-nodes-base.";

/// A node entry with a fully qualified type, e.g. `node("slack")`.
#[allow(dead_code)]
pub fn node(kind: &str) -> Value {
    json!({
        "name": kind,
        "type": format!("{}{}", PREFIX, kind),
        "parameters": {}
    })
}

/// Wraps nodes into a complete workflow document with a linear connection chain.
#[allow(dead_code)]
pub fn workflow(name: &str, nodes: Vec<Value>) -> Value {
    let mut connections = serde_json::Map::new();
    for pair in nodes.windows(2) {
        let source = pair[0]["name"].as_str().unwrap_or_default().to_string();
        let target = pair[1]["name"].as_str().unwrap_or_default().to_string();
        connections.insert(
            source,
            json!({ "main": [[{ "node": target, "type": "main", "index": 0 }]] }),
        );
    }
    json!({
        "id": "x",
        "name": name,
        "nodes": nodes,
        "connections": connections,
    })
}

/// The documented end-to-end example: webhook, github, discord, gmail, function.
#[allow(dead_code)]
pub fn github_discord_workflow() -> Value {
    workflow(
        "GitHub Issues to Discord and Email Notification System",
        vec![
            node("webhook"),
            node("github"),
            node("discord"),
            node("gmail"),
            node("function"),
        ],
    )
}

/// A simple Slack message workflow with a manual trigger.
#[allow(dead_code)]
pub fn slack_workflow() -> Value {
    workflow(
        "Send Slack Message",
        vec![node("manualTrigger"), node("slack")],
    )
}

/// A temporary corpus directory plus a separate directory for incoming files.
#[allow(dead_code)]
pub struct Sandbox {
    pub root: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(root.path().join("workflows")).unwrap();
        fs::create_dir_all(root.path().join("incoming")).unwrap();
        Self { root }
    }

    pub fn corpus(&self) -> PathBuf {
        self.root.path().join("workflows")
    }

    pub fn incoming(&self) -> PathBuf {
        self.root.path().join("incoming")
    }

    /// Writes a document into the incoming directory and returns its path.
    pub fn write_source(&self, filename: &str, document: &Value) -> PathBuf {
        let path = self.incoming().join(filename);
        fs::write(&path, serde_json::to_vec_pretty(document).unwrap()).unwrap();
        path
    }

    pub fn write_raw_source(&self, filename: &str, content: &str) -> PathBuf {
        let path = self.incoming().join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    /// Places an (empty) entry directly into the corpus.
    pub fn seed_corpus(&self, filename: &str) -> PathBuf {
        let path = self.corpus().join(filename);
        fs::write(&path, "{}").unwrap();
        path
    }

    pub fn corpus_len(&self) -> usize {
        count_files(&self.corpus())
    }
}

#[allow(dead_code)]
pub fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
