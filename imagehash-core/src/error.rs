use thiserror::Error;

use crate::kind::Kind;

#[derive(Error, Debug)]
pub enum HashError {
    #[error("No other hash to compare against")]
    NilOperand,

    #[error("Image hash kinds should be identical: {left} vs {right}")]
    KindMismatch { left: Kind, right: Kind },

    #[error("Image hash bit lengths should be identical: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Empty input")]
    EmptyInput,

    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    #[error("Empty stream")]
    EmptyStream,

    #[error("Truncated stream: expected {expected} bytes, got {actual}")]
    TruncatedStream { expected: usize, actual: usize },

    #[error("Invalid byte array size: expected {expected} bytes, got {actual}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("Unsupported hash length: {0} bits")]
    UnsupportedLength(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HashError>;
