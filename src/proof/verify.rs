//! Verification API
//!
//! Checks a game's revealed outcomes using public data only: the first
//! round hash committed before play, the round hashes revealed since, the
//! salt, and the instant-crash rate. The seed is never needed.

use thiserror::Error;

use crate::core::hash::{hash_bytes, RoundHash};
use crate::core::multiplier::Multiplier;
use crate::proof::crash_point::crash_point;

/// Errors found while auditing revealed rounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// Nothing was revealed.
    #[error("no revealed rounds to verify")]
    NothingRevealed,

    /// A revealed hash does not hash to the one revealed before it.
    #[error("round {round} does not link to the previous round hash")]
    LinkMismatch {
        /// 1-based round number of the offending reveal.
        round: usize,
    },

    /// A published multiplier differs from the recomputed one.
    #[error("crash point mismatch: published {published}, computed {computed}")]
    CrashPointMismatch {
        /// Multiplier the operator published.
        published: Multiplier,
        /// Multiplier recomputed from the round hash.
        computed: Multiplier,
    },
}

/// Hash a revealed round hash once, yielding the previous round's hash.
#[inline]
pub fn previous_round_hash(revealed: &RoundHash) -> RoundHash {
    hash_bytes(revealed)
}

/// Check that `revealed` directly follows `previous` in play order.
pub fn verify_link(previous: &RoundHash, revealed: &RoundHash) -> bool {
    previous_round_hash(revealed) == *previous
}

/// Check a run of revealed round hashes against the committed first round.
///
/// `revealed[0]` must be the first round itself; each later entry must hash
/// to the entry before it.
pub fn verify_revealed_rounds(
    first_round_hash: &RoundHash,
    revealed: &[RoundHash],
) -> Result<(), VerificationError> {
    let first = revealed.first().ok_or(VerificationError::NothingRevealed)?;
    if first != first_round_hash {
        return Err(VerificationError::LinkMismatch { round: 1 });
    }

    for (i, pair) in revealed.windows(2).enumerate() {
        if !verify_link(&pair[0], &pair[1]) {
            return Err(VerificationError::LinkMismatch { round: i + 2 });
        }
    }

    Ok(())
}

/// Recompute a round's crash point and compare it with the published value.
pub fn verify_round(
    round_hash: &RoundHash,
    salt: &[u8],
    instant_crash_rate: u32,
    published: Multiplier,
) -> Result<(), VerificationError> {
    let computed = crash_point(round_hash, salt, instant_crash_rate);
    if computed != published {
        return Err(VerificationError::CrashPointMismatch { published, computed });
    }
    Ok(())
}
