//! Game logic: configuration, the round state machine, and persistence.

pub mod config;
pub mod state;
pub mod snapshot;

pub use config::{GameConfig, DEFAULT_INSTANT_CRASH_RATE, DEFAULT_ROUNDS};
pub use state::{Game, GamePhase, Round, Rounds, EXHAUSTED_CURSOR};
pub use snapshot::GameSnapshot;
