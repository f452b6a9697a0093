//! Persisted game state.
//!
//! The chain and the cursor are the whole durable state of a game; salt and
//! instant-crash rate ride along so a snapshot restores without extra input.
//! JSON keeps byte fields hex-encoded; the binary form uses bincode.

use serde::{Deserialize, Serialize};

use crate::error::{CrashError, Result};
use crate::game::config::GameConfig;
use crate::game::state::Game;

/// Snapshot of a running game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Flat chain buffer in generation order.
    #[serde(with = "hex::serde")]
    pub chain: Vec<u8>,
    /// Byte offset of the current round.
    pub cursor: i64,
    /// Salt mixed into crash points.
    #[serde(with = "hex::serde")]
    pub salt: Vec<u8>,
    /// Instant-crash divisor.
    pub instant_crash_rate: u32,
}

impl GameSnapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CrashError::Snapshot(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CrashError::Snapshot(e.to_string()))
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CrashError::Snapshot(e.to_string()))
    }

    /// Decode from compact binary.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data).map_err(|e| CrashError::Snapshot(e.to_string()))
    }
}

impl Game {
    /// Capture the state needed to resume this game.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            chain: self.hash_chain(),
            cursor: self.cursor(),
            salt: self.salt().to_vec(),
            instant_crash_rate: self.instant_crash_rate(),
        }
    }

    /// Resume a game from a snapshot. Chain layout and cursor are validated.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self> {
        let GameSnapshot {
            chain,
            cursor,
            salt,
            instant_crash_rate,
        } = snapshot;

        let config = GameConfig::default()
            .with_salt(salt)
            .with_instant_crash_rate(instant_crash_rate)
            .with_hash_chain(chain)
            .with_cursor(cursor);

        Game::new(&[], config)
    }
}
