//! Error types for the proof system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The statement could not be lowered into a constraint system.
    #[error("synthesis error: {0}")]
    Synthesis(String),
    /// The witness does not satisfy the statement's constraints.
    #[error("unsatisfiable statement: {0}")]
    InvalidStatement(String),
    /// The proof was rejected by the verifier.
    #[error("verification failed: {0}")]
    Verification(String),
    /// The proof envelope could not be encoded or decoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
    /// The caller-provided buffer cannot hold the encoded proof.
    #[error("output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall { needed: usize, capacity: usize },
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
