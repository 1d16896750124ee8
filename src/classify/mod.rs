//! Maps raw node-type identifiers to canonical integration names.
//!
//! Classification is a pure lookup: the identifier is stripped of its vendor
//! namespace and any trailing `trigger` suffix, looked up case-insensitively in
//! the integration table, and title-cased when the table has no entry. Plumbing
//! node kinds (conditionals, merges, code steps, ...) are never services.

mod table;

pub use table::{KNOWN_SERVICES, UTILITY_NODES, canonical_name};

const TRIGGER_SUFFIX: &str = "trigger";

/// Classifies an already-stripped integration token.
///
/// Returns `None` for utility nodes and for empty tokens.
pub fn classify(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    let title = title_case(token);
    let resolved = match canonical_name(&token.to_lowercase()) {
        Some(name) => name.to_string(),
        None => title.clone(),
    };

    if is_utility_node(&resolved) || is_utility_node(token) || is_utility_node(&title) {
        return None;
    }
    Some(resolved)
}

/// Classifies a full node `type` string such as `n8n-nodes-base.slackTrigger`.
///
/// Types outside `vendor_prefix` are not integrations and yield `None`.
pub fn classify_node_type(node_type: &str, vendor_prefix: &str) -> Option<String> {
    let token = node_type.strip_prefix(vendor_prefix)?;
    classify(strip_trigger_suffix(token))
}

/// Removes one trailing `trigger` (any case) from a token.
pub fn strip_trigger_suffix(token: &str) -> &str {
    let Some(split) = token.len().checked_sub(TRIGGER_SUFFIX.len()) else {
        return token;
    };
    match token.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(TRIGGER_SUFFIX) => &token[..split],
        _ => token,
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `googleSheets` becomes `Googlesheets` and `s3_upload` becomes `S3_Upload`.
pub fn title_case(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    let mut previous_is_letter = false;
    for c in token.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

/// Case-sensitive membership in the utility node set.
pub fn is_utility_node(name: &str) -> bool {
    UTILITY_NODES.contains(&name)
}
