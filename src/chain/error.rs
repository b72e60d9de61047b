//! Errors raised while executing batched on-chain reads.

use thiserror::Error;

/// Failure of a batched read against the chain.
///
/// Any variant aborts the enclosing pool valuation and, by extension, the
/// whole TVL computation. No partial result is ever produced.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The node could not be reached or the request could not be sent.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with a non-success HTTP status.
    #[error("rpc endpoint returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code returned by the node.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The node answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// Hex or ABI decoding of a response failed.
    #[error("decoding error: {0}")]
    Decode(String),

    /// The batch returned a different number of results than requested.
    #[error("expected {expected} results from batch, got {actual}")]
    ResultCount {
        /// Number of requests sent.
        expected: usize,
        /// Number of results received.
        actual: usize,
    },

    /// A result had a different type than the consumer expected.
    #[error("unexpected value at position {index}: expected {expected}")]
    UnexpectedValue {
        /// Position of the value inside the batch.
        index: usize,
        /// Human-readable name of the expected type.
        expected: &'static str,
    },
}

impl ReadError {
    /// Returns the upstream HTTP status carried by this error, if any.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
