//! Game configuration.

use crate::core::chain::MIN_ROUNDS;

/// Rounds generated when none are requested.
pub const DEFAULT_ROUNDS: usize = 100;

/// Roughly 1 in this many rounds is forced to an instant crash.
pub const DEFAULT_INSTANT_CRASH_RATE: u32 = 20;

/// Options for [`Game::new`](crate::game::Game::new).
///
/// `chain` and `cursor` are the restoration path: when both are set the game
/// is rebuilt from them alone and no chain is generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Mixed into every round's crash point.
    pub salt: Vec<u8>,
    /// Rounds to generate. At least [`MIN_ROUNDS`].
    pub rounds: usize,
    /// Instant-crash divisor, must be positive.
    pub instant_crash_rate: u32,
    /// Persisted chain to restore instead of generating one.
    pub chain: Option<Vec<u8>>,
    /// Persisted cursor (byte offset into the chain).
    pub cursor: Option<i64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            salt: Vec::new(),
            rounds: DEFAULT_ROUNDS,
            instant_crash_rate: DEFAULT_INSTANT_CRASH_RATE,
            chain: None,
            cursor: None,
        }
    }
}

impl GameConfig {
    /// Create config from environment variables.
    ///
    /// Reads `CRASH_SALT`, `CRASH_ROUNDS` and `CRASH_INSTANT_CRASH_RATE`;
    /// missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            salt: std::env::var("CRASH_SALT")
                .map(String::into_bytes)
                .unwrap_or(defaults.salt),
            rounds: std::env::var("CRASH_ROUNDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rounds),
            instant_crash_rate: std::env::var("CRASH_INSTANT_CRASH_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.instant_crash_rate),
            chain: None,
            cursor: None,
        }
    }

    /// Set the salt.
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = salt.into();
        self
    }

    /// Set the number of rounds to generate.
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the instant-crash rate.
    pub fn with_instant_crash_rate(mut self, rate: u32) -> Self {
        self.instant_crash_rate = rate;
        self
    }

    /// Supply a persisted hash chain.
    pub fn with_hash_chain(mut self, chain: impl Into<Vec<u8>>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    /// Supply a persisted cursor.
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Whether both halves of the persisted state are present.
    pub fn is_restoration(&self) -> bool {
        self.chain.is_some() && self.cursor.is_some()
    }

    /// Whether the requested round count meets the minimum.
    pub fn has_enough_rounds(&self) -> bool {
        self.rounds >= MIN_ROUNDS
    }
}
