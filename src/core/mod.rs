//! Core primitives: hashing, the hash chain, and fixed-point multipliers.

pub mod hash;
pub mod chain;
pub mod multiplier;

pub use hash::{hash_bytes, RoundHash, HASH_SIZE};
pub use chain::{build_chain, HashChain, MIN_ROUNDS};
pub use multiplier::Multiplier;
