//! Errors surfaced by the engine.
//!
//! Only malformed input, unusable parameters and I/O failures are errors. An
//! unreachable target pattern and every pruning decision are ordinary outcomes.

use std::fmt;
use std::io;

use crate::params::ParamError;
use crate::types::Item;

/// What was wrong with a data line or a result line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Expected `items : tu : utilities`, found a different number of `:` fields.
    FieldCount { found: usize },
    /// A token that should be an integer is not.
    InvalidInteger { token: String },
    /// A token that should be a decimal number is not.
    InvalidNumber { token: String },
    /// Items and utilities are not positionally aligned.
    LengthMismatch { items: usize, utilities: usize },
    /// An item is listed more than once in one transaction.
    DuplicateItem { item: Item },
    /// A result line lacks one of its `#TAG:` fields.
    MissingTag { tag: &'static str },
}

/// Parse failure with the 1-based line number it occurred on (0 when parsing a lone string).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    pub(crate) fn integer(line: usize, token: &str) -> Self {
        Self::new(
            line,
            ParseErrorKind::InvalidInteger {
                token: token.to_string(),
            },
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::FieldCount { found } => {
                write!(f, "expected 3 ':'-separated fields, found {found}")
            }
            ParseErrorKind::InvalidInteger { token } => write!(f, "not an integer: {token:?}"),
            ParseErrorKind::InvalidNumber { token } => write!(f, "not a number: {token:?}"),
            ParseErrorKind::LengthMismatch { items, utilities } => write!(
                f,
                "{items} items but {utilities} utilities"
            ),
            ParseErrorKind::DuplicateItem { item } => write!(f, "item {item} listed twice"),
            ParseErrorKind::MissingTag { tag } => write!(f, "missing {tag} field"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Top-level engine error.
#[derive(Debug)]
pub enum MineError {
    InvalidParams(ParamError),
    Parse(ParseError),
    Io { context: String, source: io::Error },
}

impl MineError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for MineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MineError::InvalidParams(e) => write!(f, "invalid parameters: {e}"),
            MineError::Parse(e) => write!(f, "malformed input, {e}"),
            MineError::Io { context, source } => write!(f, "{context}: {source}"),
        }
    }
}

impl std::error::Error for MineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MineError::InvalidParams(e) => Some(e),
            MineError::Parse(e) => Some(e),
            MineError::Io { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for MineError {
    fn from(e: ParseError) -> Self {
        MineError::Parse(e)
    }
}

impl From<ParamError> for MineError {
    fn from(e: ParamError) -> Self {
        MineError::InvalidParams(e)
    }
}
