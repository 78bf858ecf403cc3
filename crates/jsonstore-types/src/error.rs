use thiserror::Error;

/// Errors produced when parsing a path expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path expression is empty")]
    Empty,

    #[error("path expression has an empty segment at position {position}")]
    EmptySegment { position: usize },
}
