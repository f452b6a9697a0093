//! Crash Point Derivation
//!
//! Maps a revealed round hash to that round's multiplier. Pure and
//! standalone so that any auditor holding the round hash, the salt and the
//! instant-crash rate can recompute a published outcome.
//!
//! ```text
//! mac = HMAC-SHA256(key = round_hash, msg = salt)
//!
//! mac mod rate == 0          -> 1.00 (instant crash)
//! otherwise  h = top 52 bits of mac  (first 13 hex digits)
//!            E = 2^52
//!            multiplier = floor((100*E - h) / (E - h)) / 100
//! ```

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::core::multiplier::Multiplier;

type HmacSha256 = Hmac<Sha256>;

/// Width of the window read from the MAC (13 hex digits).
pub const WINDOW_BITS: u32 = 52;

/// `E = 2^52`, the exclusive upper bound of the window.
pub const WINDOW_SIZE: u64 = 1 << WINDOW_BITS;

/// Compute the crash point for a round.
///
/// An `instant_crash_rate` of zero disables the forced instant crash; games
/// never construct with a zero rate.
pub fn crash_point(round_hash: &[u8], salt: &[u8], instant_crash_rate: u32) -> Multiplier {
    let mac = round_mac(round_hash, salt);

    if instant_crash_rate != 0 && rem_u256(&mac, instant_crash_rate) == 0 {
        return Multiplier::INSTANT_CRASH;
    }

    Multiplier::from_hundredths(multiplier_hundredths(window(&mac)))
}

/// HMAC-SHA256 keyed with the round hash over the salt.
pub fn round_mac(round_hash: &[u8], salt: &[u8]) -> [u8; 32] {
    // HMAC accepts keys of any length.
    let mut mac = HmacSha256::new_from_slice(round_hash).expect("HMAC key of any size");
    mac.update(salt);
    mac.finalize().into_bytes().into()
}

/// Exact remainder of the big-endian 256-bit integer `value` modulo `modulus`.
fn rem_u256(value: &[u8; 32], modulus: u32) -> u32 {
    let modulus = u64::from(modulus);
    let rem = value
        .iter()
        .fold(0u64, |acc, &byte| ((acc << 8) | u64::from(byte)) % modulus);
    rem as u32
}

/// Top 52 bits of the MAC, equal to its first 13 hex digits.
fn window(mac: &[u8; 32]) -> u64 {
    let mut head = [0u8; 8];
    head[1..].copy_from_slice(&mac[..7]);
    u64::from_be_bytes(head) >> 4
}

/// `floor((100*E - h) / (E - h))` for `h < E`.
fn multiplier_hundredths(h: u64) -> u64 {
    debug_assert!(h < WINDOW_SIZE);
    (100 * WINDOW_SIZE - h) / (WINDOW_SIZE - h)
}
