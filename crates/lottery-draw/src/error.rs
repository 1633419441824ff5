//! Draw error types.

use thiserror::Error;

/// Errors raised while validating or running a draw.
///
/// Any of these aborts the whole run; there is no partial result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("seed must not be empty")]
    EmptySeed,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed block hash: {0}")]
    MalformedBlockHash(String),

    #[error("hash chain exhausted: {rehashes} rehashes without a free index after {drawn} winners")]
    ChainExhausted { drawn: usize, rehashes: u64 },

    #[error("commitment mismatch: expected {expected}, computed {computed}")]
    CommitmentMismatch { expected: String, computed: String },

    #[error("published result mismatch: published {published:?}, computed {computed:?}")]
    PublishedMismatch {
        published: Vec<u64>,
        computed: Vec<u64>,
    },
}
