//! Two-Decimal Fixed-Point Multiplier
//!
//! Crash points are stored as integer hundredths so the outcome never passes
//! through a float. `10.41x` is `Multiplier(1041)`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  hundredths: u64                             │
//! │  1.00  -> 100      (instant crash, minimum)  │
//! │  10.41 -> 1041                               │
//! └──────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed-point scale: two fractional digits.
pub const MULTIPLIER_SCALE: u64 = 100;

/// Payout multiplier with exactly two fractional digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(u64);

impl Multiplier {
    /// The instant-crash multiplier, `1.00`.
    pub const INSTANT_CRASH: Multiplier = Multiplier(MULTIPLIER_SCALE);

    /// Create from a count of hundredths.
    #[inline]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Raw value in hundredths.
    #[inline]
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Whole part of the multiplier.
    #[inline]
    pub const fn whole(self) -> u64 {
        self.0 / MULTIPLIER_SCALE
    }

    /// Fractional part in hundredths (`0..100`).
    #[inline]
    pub const fn fraction(self) -> u64 {
        self.0 % MULTIPLIER_SCALE
    }

    /// Whether this is the minimum payout.
    #[inline]
    pub fn is_instant_crash(self) -> bool {
        self == Self::INSTANT_CRASH
    }

    /// Convert to float for display layers only.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MULTIPLIER_SCALE as f64
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.whole(), self.fraction())
    }
}

/// Error parsing a multiplier from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid multiplier: {0:?}")]
pub struct ParseMultiplierError(String);

impl FromStr for Multiplier {
    type Err = ParseMultiplierError;

    /// Parses `"10"`, `"10.4"` or `"10.41"`. More than two fractional digits
    /// is rejected rather than rounded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMultiplierError(s.to_string());
        let (whole, fraction) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || fraction.len() > 2 {
            return Err(err());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let whole: u64 = whole.parse().map_err(|_| err())?;
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| err())? * 10,
            _ => fraction.parse().map_err(|_| err())?,
        };

        whole
            .checked_mul(MULTIPLIER_SCALE)
            .and_then(|v| v.checked_add(fraction))
            .map(Self)
            .ok_or_else(err)
    }
}
