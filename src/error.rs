use thiserror::Error;

/// Errors raised while decoding a workflow document at the input boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Workflow document must be a JSON object, found {0}")]
    NotAnObject(String),
}

/// Errors that can occur while analyzing a single workflow file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Failed to read workflow file '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("Failed to read workflow file: {0}")]
    Malformed(#[from] WorkflowError),
}

/// Errors raised while scanning or preparing the corpus directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    #[error("Could not list corpus directory '{path}': {message}")]
    ScanFailed { path: String, message: String },

    #[error("Could not create corpus directory '{path}': {message}")]
    CreateFailed { path: String, message: String },
}

/// Errors that abort the ingestion of a single source file.
///
/// None of these leave a trace in the corpus: every variant is raised before the
/// target file is written, or after a failed write has been cleaned up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("File '{0}' not found.")]
    NotFound(String),

    #[error("File '{0}' is not a JSON file.")]
    UnsupportedExtension(String),

    #[error("Error reading file '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("Error decoding JSON from '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: WorkflowError,
    },

    #[error("File '{0}' is not a valid workflow file (missing 'nodes' or 'connections').")]
    Incomplete(String),

    #[error("Operation cancelled by user.")]
    Cancelled,

    #[error("Target file '{0}' already exists in repository.")]
    Collision(String),

    #[error("Failed to copy file to '{path}': {message}")]
    CopyFailed { path: String, message: String },
}

/// Errors raised while loading a `CatalogConfig`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid config file '{path}': {message}")]
    Invalid { path: String, message: String },
}

/// Errors reported by the reindex guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReindexError {
    #[error("A reindex is already in progress")]
    AlreadyRunning,

    #[error("Reindex failed: {0}")]
    Failed(String),
}
