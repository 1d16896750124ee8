//! The numbering authority: which sequence numbers the corpus already uses,
//! and which one a new entry gets.
//!
//! A `SequenceRegistry` holds no state of its own beyond the process. It is
//! rebuilt from the corpus directory with [`SequenceRegistry::scan`], read with
//! [`SequenceRegistry::peek_next`] and advanced only through
//! [`SequenceRegistry::commit`] once a file has actually been written.
//!
//! The registry is a plain value. Callers that share it between threads wrap it
//! in a lock held across the whole peek, write and commit sequence (see
//! [`crate::ingest::Ingestor`]).

use crate::error::CorpusError;
use ahash::AHashSet;
use itertools::Itertools;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

/// Extension shared by every corpus entry.
pub const CORPUS_EXTENSION: &str = "json";

static SEQUENCE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4,})_").expect("sequence prefix regex should compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRegistry {
    used_numbers: AHashSet<u32>,
    next_number: u32,
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceRegistry {
    /// An empty registry; the first number handed out is 1.
    pub fn new() -> Self {
        Self {
            used_numbers: AHashSet::new(),
            next_number: 1,
        }
    }

    pub fn from_numbers(numbers: impl IntoIterator<Item = u32>) -> Self {
        let mut registry = Self::new();
        for number in numbers {
            registry.insert(number);
        }
        registry
    }

    /// Builds a registry from the `NNNN_*.json` entries of a corpus directory.
    ///
    /// A missing directory is an empty corpus. Names without a numeric prefix of
    /// at least four digits are ignored.
    pub fn scan(corpus_dir: &Path) -> Result<Self, CorpusError> {
        let scan_error = |e: std::io::Error| CorpusError::ScanFailed {
            path: corpus_dir.display().to_string(),
            message: e.to_string(),
        };

        let entries = match fs::read_dir(corpus_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "Corpus directory '{}' does not exist, starting empty",
                    corpus_dir.display()
                );
                return Ok(Self::new());
            }
            Err(e) => return Err(scan_error(e)),
        };

        let mut registry = Self::new();
        for entry in entries {
            let path = entry.map_err(scan_error)?.path();
            let is_corpus_file = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CORPUS_EXTENSION));
            if !is_corpus_file {
                continue;
            }
            if let Some(number) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(Self::sequence_number)
            {
                registry.insert(number);
            }
        }

        tracing::debug!(
            "Scanned '{}': {} numbers in use, next is {}",
            corpus_dir.display(),
            registry.used_numbers.len(),
            registry.next_number
        );
        Ok(registry)
    }

    /// The sequence number encoded in a corpus filename, if it has one.
    ///
    /// The prefix is zero-padded to at least four digits and grows past 9999.
    pub fn sequence_number(filename: &str) -> Option<u32> {
        SEQUENCE_PREFIX
            .captures(filename)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse().ok())
    }

    /// The number the next ingestion will use. Repeated calls without an
    /// intervening `commit` return the same value.
    pub fn peek_next(&self) -> u32 {
        self.next_number
    }

    /// Records `number` as used. Call only after the file carrying it is written.
    pub fn commit(&mut self, number: u32) {
        self.insert(number);
    }

    pub fn contains(&self, number: u32) -> bool {
        self.used_numbers.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.used_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used_numbers.is_empty()
    }

    /// The highest number in use, if any.
    pub fn last_number(&self) -> Option<u32> {
        self.used_numbers.iter().copied().max()
    }

    /// Used numbers in ascending order.
    pub fn used_numbers(&self) -> Vec<u32> {
        self.used_numbers.iter().copied().sorted().collect()
    }

    // Zero is not a valid sequence number and never moves `next_number`.
    fn insert(&mut self, number: u32) {
        if number == 0 {
            return;
        }
        self.used_numbers.insert(number);
        self.next_number = self.next_number.max(number.saturating_add(1));
    }
}
