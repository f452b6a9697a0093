//! # Crash Chain
//!
//! Provably-fair round engine for crash games.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CRASH CHAIN                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                 │
//! │  ├── hash.rs     - SHA-256 round hashing                    │
//! │  ├── chain.rs    - Seed -> hash chain commitment            │
//! │  └── multiplier.rs - Two-decimal fixed-point multiplier     │
//! │                                                             │
//! │  game/           - Round state machine                      │
//! │  ├── config.rs   - Game options and defaults                │
//! │  ├── state.rs    - Cursor over the chain, round reveal      │
//! │  └── snapshot.rs - Persist / resume                         │
//! │                                                             │
//! │  proof/          - Public verification                      │
//! │  ├── crash_point.rs - Round hash + salt -> multiplier       │
//! │  └── verify.rs   - Chain-link and outcome auditing          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fairness Guarantee
//!
//! The whole chain is derived from a secret seed before play, and rounds are
//! revealed from its last digest backwards. The first round hash is published
//! up front; every later round hash, hashed once, reproduces the hash revealed
//! before it. Outcomes therefore cannot be changed after the commitment, and
//! future rounds cannot be predicted from past ones.
//!
//! ```
//! use crash_chain::{Game, GameConfig};
//!
//! let mut game = Game::new(
//!     b"this is a seed",
//!     GameConfig::default().with_rounds(10).with_salt("this is a salt"),
//! )
//! .unwrap();
//!
//! let commitment = game.first_round_hash();
//! let round = game.play().next().unwrap();
//! assert_eq!(round.hash, commitment);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod game;
pub mod proof;

// Re-export commonly used types
pub use crate::core::chain::{build_chain, HashChain, MIN_ROUNDS};
pub use crate::core::hash::{hash_bytes as standalone_hash, RoundHash, HASH_SIZE};
pub use crate::core::multiplier::Multiplier;
pub use error::{CrashError, Result};
pub use game::{Game, GameConfig, GamePhase, GameSnapshot, Round};
pub use proof::crash_point::crash_point;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
