//! Engine errors.

use thiserror::Error;

/// Errors raised by chain construction, round play, and restoration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CrashError {
    /// Fewer rounds requested than a verifiable chain needs.
    #[error("not enough rounds: requested {requested}, minimum is {minimum}")]
    TooFewRounds {
        /// Rounds requested by the caller.
        requested: usize,
        /// Minimum number of rounds.
        minimum: usize,
    },

    /// The chain is exhausted, or no round has been advanced into yet.
    #[error("no more rounds")]
    NoMoreRounds,

    /// Persisted or supplied state violates the chain/cursor contract.
    #[error("invalid game state: {0}")]
    InvalidState(String),

    /// A persisted snapshot could not be decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CrashError>;
