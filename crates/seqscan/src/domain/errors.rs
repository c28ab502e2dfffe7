//! Domain-specific errors.

use thiserror::Error;

/// Errors raised while building or mutating a [`Sequence`](super::sequence::Sequence).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("'{item}' is not a member of the sequence")]
    StructuralMismatch { item: String },
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: String,
    },
    #[error("'{item}' is already a member of the sequence")]
    DuplicateMember { item: String },
    #[error("index {index} out of range for sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot build a sequence from an empty list of items")]
    EmptyInput,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Errors raised by the format engine while parsing templates or notations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown directive '%{0}'")]
    UnknownDirective(char),
    #[error("template ends with a dangling '%'")]
    DanglingPercent,
    #[error("'{text}' does not match template '{template}'")]
    NoMatch { text: String, template: String },
    #[error("invalid frame number '{0}'")]
    InvalidNumber(String),
    #[error("template '{0}' carries no frame information")]
    MissingFrames(String),
    #[error("notation expands to {requested} frames, more than the limit of {limit}")]
    TooManyFrames { requested: u64, limit: u64 },
    #[error("template '{template}' cannot be matched: {reason}")]
    InvalidPattern { template: String, reason: String },
}

pub type SeqResult<T> = Result<T, SequenceError>;
