use crate::inspect::TriggerType;
use crate::numbering::CORPUS_EXTENSION;
use itertools::Itertools;
use regex::Regex;
use std::sync::LazyLock;

/// At most this many services are named in a filename.
pub const MAX_SERVICES_IN_NAME: usize = 2;

/// Stands in for the service list when no integration was detected.
pub const NO_SERVICE_TOKEN: &str = "Manual";

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("unsafe char regex should compile"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("underscore run regex should compile"));

/// Builds the canonical corpus filename for a workflow.
///
/// Layout: `NNNN_Service1_Service2_Purpose[_Trigger].json`, with services sorted
/// lexicographically and the trigger omitted for `Manual` and `Triggered`.
/// The result only contains `[A-Za-z0-9_-]` before the extension.
///
/// This does not consult the corpus; collision checks belong to the caller.
pub fn synthesize<I, S>(number: u32, services: I, purpose: &str, trigger: TriggerType) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tokens = vec![format!("{:04}", number)];

    let selected: Vec<String> = services
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .sorted()
        .dedup()
        .take(MAX_SERVICES_IN_NAME)
        .collect();
    if selected.is_empty() {
        tokens.push(NO_SERVICE_TOKEN.to_string());
    } else {
        tokens.extend(selected);
    }

    tokens.push(purpose.to_string());

    if trigger.appears_in_filename() {
        tokens.push(trigger.as_str().to_string());
    }

    format!("{}.{}", sanitize_stem(&tokens.join("_")), CORPUS_EXTENSION)
}

/// Drops unsafe characters, collapses `_` runs and trims `_` at both ends.
pub fn sanitize_stem(raw: &str) -> String {
    let stripped = UNSAFE_CHARS.replace_all(raw, "");
    let collapsed = UNDERSCORE_RUNS.replace_all(&stripped, "_");
    collapsed.trim_matches('_').to_string()
}
