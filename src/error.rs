//! Error types for ROD decoding and encoding.
//!
//! Decoding and encoding fail in different ways, so each direction has its
//! own error enum:
//!
//! - [`DecodeError`]: the input text is not a valid ROD document, or it
//!   describes a tree that breaks a model invariant (duplicate keys,
//!   composite map keys, nesting too deep).
//! - [`EncodeError`]: the tree cannot be written canonically (a struct field
//!   name that is not an identifier, a composite map key), or the sink failed.
//!
//! [`Error`] wraps both for callers that do both in one step, such as
//! [`canonicalize`](crate::canonicalize), and also carries value conversion
//! failures.
//!
//! ## Diagnostics
//!
//! Every positioned decode error renders as
//! `<line>:<column>: expected <description>, got <description>`:
//!
//! ```rust
//! use rod::{from_str, DecodeError};
//!
//! let err = from_str("( \"K\" )").unwrap_err();
//! assert_eq!(err.to_string(), "1:7: expected ':', got ')'");
//! assert!(matches!(err, DecodeError::Syntax { .. }));
//! ```

use thiserror::Error;

/// Errors produced while turning ROD text into a [`RodValue`](crate::RodValue).
///
/// Lines and columns are 1-based; columns count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input contained one grammar element where another was required.
    #[error("{line}:{column}: expected {expected}, got {got}")]
    Syntax {
        line: usize,
        column: usize,
        expected: String,
        got: String,
    },

    /// The input ended while a value, string, blob, comment or composite was
    /// still open.
    #[error("{line}:{column}: expected {expected}, got end of file")]
    UnexpectedEof {
        line: usize,
        column: usize,
        expected: String,
    },

    /// A map contained two keys that compare equal.
    #[error("{line}:{column}: duplicate map key {key}")]
    DuplicateKey {
        line: usize,
        column: usize,
        key: String,
    },

    /// A struct contained the same field name twice.
    #[error("{line}:{column}: duplicate struct field {field}")]
    DuplicateField {
        line: usize,
        column: usize,
        field: String,
    },

    /// An array, map or struct appeared where a map key was required.
    #[error("{line}:{column}: expected primitive value, got {got}")]
    InvalidMapKey {
        line: usize,
        column: usize,
        got: String,
    },

    /// Composite values were nested deeper than the configured limit.
    #[error("{line}:{column}: nesting exceeds the maximum depth of {limit}")]
    DepthLimit {
        line: usize,
        column: usize,
        limit: usize,
    },

    /// The input bytes were not valid UTF-8.
    #[error("input is not valid UTF-8 after byte offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// Reading from the source failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl DecodeError {
    /// Creates a syntax error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::DecodeError;
    ///
    /// let err = DecodeError::syntax(3, 9, "digit", "'e'");
    /// assert_eq!(err.to_string(), "3:9: expected digit, got 'e'");
    /// ```
    pub fn syntax(line: usize, column: usize, expected: &str, got: &str) -> Self {
        DecodeError::Syntax {
            line,
            column,
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, column: usize, expected: &str) -> Self {
        DecodeError::UnexpectedEof {
            line,
            column,
            expected: expected.to_string(),
        }
    }

    /// Creates an I/O error from a failed read.
    pub fn io(msg: &str) -> Self {
        DecodeError::Io(msg.to_string())
    }

    /// Returns the `(line, column)` the error points at, if it has one.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            DecodeError::Syntax { line, column, .. }
            | DecodeError::UnexpectedEof { line, column, .. }
            | DecodeError::DuplicateKey { line, column, .. }
            | DecodeError::DuplicateField { line, column, .. }
            | DecodeError::InvalidMapKey { line, column, .. }
            | DecodeError::DepthLimit { line, column, .. } => Some((*line, *column)),
            DecodeError::InvalidUtf8 { .. } | DecodeError::Io(_) => None,
        }
    }

    /// Returns `true` if the input ended before the document was complete.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEof { .. })
    }
}

/// Errors produced while writing a [`RodValue`](crate::RodValue) as text.
///
/// Encoding is not atomic: when an error is returned, whatever was written
/// before the failing value stays in the sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A struct field name does not match `[A-Za-z_][0-9A-Za-z_]*`.
    #[error("invalid identifier {0:?}")]
    InvalidIdentifier(String),

    /// A composite value was used as a map key.
    #[error("cannot encode {kind} as map key")]
    InvalidMapKey { kind: &'static str },

    /// Composites are nested deeper than [`EncodeOptions::max_depth`].
    ///
    /// [`EncodeOptions::max_depth`]: crate::EncodeOptions::max_depth
    #[error("nesting exceeds the maximum depth of {limit}")]
    DepthLimit { limit: usize },

    /// Writing to the sink failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl EncodeError {
    /// Creates an I/O error from a failed write.
    pub fn io(msg: &str) -> Self {
        EncodeError::Io(msg.to_string())
    }
}

/// Any error this crate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// A value could not be converted to the requested Rust type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl Error {
    /// Creates a conversion error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rod::Error;
    ///
    /// let err = Error::type_mismatch("int", "string");
    /// assert_eq!(err.to_string(), "type mismatch: expected int, found string");
    /// ```
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
