//! Error types for drift-core

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::snapshot::InputRole;

/// Result type for drift-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in drift-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more inputs failed structural decoding
    #[error("{0}")]
    Decode(Diagnostics),
}

/// A single malformed entry found while decoding one of the three inputs
///
/// Issues never abort a reconciliation pass; they are collected into a
/// [`Diagnostics`] and the affected input participates as an empty mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeIssue {
    /// Which input the issue was found in
    pub input: InputRole,
    /// Dot-separated path to the offending entry; empty for the root value
    pub path: String,
    /// Human-readable description of the problem
    pub message: String,
}

impl DecodeIssue {
    /// Issue at a specific entry path within `input`
    pub fn at(input: InputRole, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Issue with the root value of `input` (e.g. not a mapping at all)
    pub fn root(input: InputRole, message: impl Into<String>) -> Self {
        Self {
            input,
            path: String::new(),
            message: message.into(),
        }
    }
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{} input: {}", self.input, self.message)
        } else {
            write!(f, "{} input at `{}`: {}", self.input, self.path, self.message)
        }
    }
}

impl std::error::Error for DecodeIssue {}

/// Aggregated decode issues from one reconciliation pass
///
/// Decoding is best-effort: every malformed entry across all three inputs is
/// collected here rather than failing on the first, so a caller surfaces all
/// structural problems in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    issues: Vec<DecodeIssue>,
}

impl Diagnostics {
    /// Create an empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single issue
    pub fn push(&mut self, issue: DecodeIssue) {
        self.issues.push(issue);
    }

    /// Record every issue from an iterator
    pub fn extend(&mut self, issues: impl IntoIterator<Item = DecodeIssue>) {
        self.issues.extend(issues);
    }

    /// Fold another collection into this one, preserving order
    pub fn merge(mut self, other: Diagnostics) -> Self {
        self.issues.extend(other.issues);
        self
    }

    /// True when no issues were recorded
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// The recorded issues, in the order they were found
    pub fn issues(&self) -> &[DecodeIssue] {
        &self.issues
    }

    /// Convert to a `Result`, failing when any issue was recorded
    ///
    /// For callers that treat a malformed input as fatal instead of
    /// accepting the best-effort outputs.
    pub fn into_result(self) -> Result<()> {
        if self.is_clean() {
            Ok(())
        } else {
            Err(Error::Decode(self))
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "no decode issues");
        }
        write!(f, "{} decode issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}
