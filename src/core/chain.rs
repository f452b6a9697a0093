//! Hash Chain
//!
//! A chain of `n` SHA-256 digests generated from a secret seed. Element `i`
//! is the hash applied `i + 1` times to the seed, so the buffer is laid out
//! in increasing order of hash-application count:
//!
//! ```text
//! offset:   0          32         64               (n-1)*32
//!         ┌──────────┬──────────┬──────────┬─────┬──────────┐
//!         │  H(seed) │ H²(seed) │ H³(seed) │ ... │ Hⁿ(seed) │
//!         └──────────┴──────────┴──────────┴─────┴──────────┘
//!           last round                              first round
//! ```
//!
//! Rounds are played from the end of the buffer towards the start. Hashing a
//! newly revealed digest once reproduces the digest revealed before it, which
//! lets anyone verify the sequence without learning the seed.

use super::hash::{hash_bytes, RoundHash, HASH_SIZE};
use crate::error::{CrashError, Result};

/// Minimum number of rounds in a chain.
pub const MIN_ROUNDS: usize = 2;

/// Build the flat chain buffer for `rounds` rounds from `seed`.
///
/// Output is exactly `rounds * 32` bytes.
pub fn build_chain(seed: &[u8], rounds: usize) -> Result<Vec<u8>> {
    if rounds < MIN_ROUNDS {
        return Err(CrashError::TooFewRounds {
            requested: rounds,
            minimum: MIN_ROUNDS,
        });
    }

    let mut chain = Vec::with_capacity(rounds * HASH_SIZE);
    let mut digest = hash_bytes(seed);

    for _ in 0..rounds {
        chain.extend_from_slice(&digest);
        digest = hash_bytes(&digest);
    }

    Ok(chain)
}

/// Immutable hash chain owned by a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChain {
    bytes: Vec<u8>,
}

impl HashChain {
    /// Generate a chain from a seed.
    pub fn generate(seed: &[u8], rounds: usize) -> Result<Self> {
        Ok(Self {
            bytes: build_chain(seed, rounds)?,
        })
    }

    /// Wrap a persisted chain buffer.
    ///
    /// The buffer must be non-empty and a whole number of digests. Links are
    /// not re-verified here; see [`HashChain::verify_links`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(CrashError::InvalidState("hash chain is empty".into()));
        }
        if bytes.len() % HASH_SIZE != 0 {
            return Err(CrashError::InvalidState(format!(
                "hash chain length {} is not a multiple of {}",
                bytes.len(),
                HASH_SIZE
            )));
        }
        Ok(Self { bytes })
    }

    /// Length of the chain in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the chain holds no digests. Never true for a constructed chain.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of digests (rounds) in the chain.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.bytes.len() / HASH_SIZE
    }

    /// Digest starting at byte `offset`, if a whole digest is there.
    pub fn digest_at(&self, offset: usize) -> Option<RoundHash> {
        let end = offset.checked_add(HASH_SIZE)?;
        self.bytes
            .get(offset..end)
            .and_then(|slice| RoundHash::try_from(slice).ok())
    }

    /// Digest at generation index `index` (hash applied `index + 1` times).
    pub fn digest(&self, index: usize) -> Option<RoundHash> {
        self.digest_at(index.checked_mul(HASH_SIZE)?)
    }

    /// Highest-index digest: the one revealed in the very first round.
    pub fn terminal_hash(&self) -> RoundHash {
        let mut hash = [0u8; HASH_SIZE];
        hash.copy_from_slice(&self.bytes[self.bytes.len() - HASH_SIZE..]);
        hash
    }

    /// Check the forward-hash relation across the whole chain.
    ///
    /// Returns the generation index of the first digest whose hash does not
    /// match its successor, if any.
    pub fn verify_links(&self) -> std::result::Result<(), usize> {
        let digests: Vec<&[u8]> = self.bytes.chunks_exact(HASH_SIZE).collect();
        for (index, pair) in digests.windows(2).enumerate() {
            if hash_bytes(pair[0]) != pair[1] {
                return Err(index);
            }
        }
        Ok(())
    }

    /// Borrow the flat buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the flat buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
