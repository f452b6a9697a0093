//! Round Hashing
//!
//! The hash primitive behind the chain. Exposed so that third parties can
//! check chain links without access to a [`Game`](crate::game::Game):
//! hashing a revealed round hash once must reproduce the hash revealed
//! one round earlier.

use sha2::{Digest, Sha256};

use crate::error::{CrashError, Result};

/// Size of a single chain digest in bytes.
pub const HASH_SIZE: usize = 32;

/// Hash output type (256 bits / 32 bytes).
pub type RoundHash = [u8; HASH_SIZE];

/// Compute the SHA-256 digest of arbitrary data.
pub fn hash_bytes(data: &[u8]) -> RoundHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hex-encode a round hash for transport or display.
pub fn hash_to_hex(hash: &RoundHash) -> String {
    hex::encode(hash)
}

/// Decode a hex-encoded round hash.
///
/// Fails with [`CrashError::InvalidState`] unless the input decodes to
/// exactly 32 bytes.
pub fn hash_from_hex(encoded: &str) -> Result<RoundHash> {
    let bytes = hex::decode(encoded)
        .map_err(|e| CrashError::InvalidState(format!("invalid round hash hex: {e}")))?;

    RoundHash::try_from(bytes.as_slice()).map_err(|_| {
        CrashError::InvalidState(format!(
            "round hash must be {} bytes, got {}",
            HASH_SIZE,
            bytes.len()
        ))
    })
}
