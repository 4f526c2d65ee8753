//! Error types for the BLIF parser.
//!
//! This module provides a unified error type [`BlifError`] that covers
//! construction failures of single keyword lines, whole-document validation
//! failures and the fatal I/O conditions that abort a parse.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`BlifError`].
pub type Result<T> = std::result::Result<T, BlifError>;

/// Unified error type for all BLIF operations.
#[derive(Error, Debug)]
pub enum BlifError {
    // ============ Construction Errors ============
    /// Parameters have the wrong shape (arity, whitespace, missing separator)
    #[error("{message}")]
    InvalidFormat { keyword: String, message: String },

    /// Parameters have the right shape but an unaccepted value or character
    #[error("{message}")]
    InvalidValue { keyword: String, message: String },

    // ============ Validation Errors ============
    /// The FSM section is inconsistent
    #[error("{message}")]
    InvalidFsm { message: String },

    /// A boolean function's truth table is malformed
    #[error("{message}")]
    InvalidTruthTable { message: String },

    // ============ I/O Errors ============
    /// Error reading a BLIF file
    #[error("Failed to read BLIF file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An imported document is unknown to the loader
    #[error("Imported file '{path}' not found")]
    ImportNotFound { path: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl BlifError {
    /// Create a format error for a keyword
    pub fn format(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Create a value error for a keyword
    pub fn value(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    /// Create an FSM validation error
    pub fn fsm(message: impl Into<String>) -> Self {
        Self::InvalidFsm {
            message: message.into(),
        }
    }

    /// Create a truth table validation error
    pub fn truth_table(message: impl Into<String>) -> Self {
        Self::InvalidTruthTable {
            message: message.into(),
        }
    }
}

/// Category of a document diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Misplaced keyword, unknown keyword, stray text
    Error,
    /// A keyword line that failed to construct
    Parsing,
    /// The FSM section failed validation
    Fsm,
    /// A boolean function failed validation
    BooleanFunction,
}

impl ProblemKind {
    /// The bracketed tag prefixed to diagnostics of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Error => "[ERROR]",
            Self::Parsing => "[PARSING ERROR]",
            Self::Fsm => "[FSM PROBLEM]",
            Self::BooleanFunction => "[BOOLEAN FUNCTION PROBLEM]",
        }
    }

    /// Format a diagnostic, with an approximate source line when known.
    pub fn diagnostic(&self, line: Option<usize>, message: impl fmt::Display) -> String {
        match line {
            Some(line) => format!("{}[LINE ~ {}] {}", self.tag(), line, message),
            None => format!("{} {}", self.tag(), message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_displays_bare_message() {
        let err = BlifError::value(".i", ".i parameter needs to be numeric");
        assert_eq!(err.to_string(), ".i parameter needs to be numeric");
    }

    #[test]
    fn test_diagnostic_format() {
        assert_eq!(
            ProblemKind::Parsing.diagnostic(Some(4), "boom"),
            "[PARSING ERROR][LINE ~ 4] boom"
        );
        assert_eq!(
            ProblemKind::Fsm.diagnostic(None, ".i must be set"),
            "[FSM PROBLEM] .i must be set"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = BlifError::FileReadError {
            path: "missing.blif".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.blif"));
    }
}
