//! Provably-Fair Proof System
//!
//! Everything an outside auditor needs to check a revealed round:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  crash_point.rs  - Round hash + salt -> multiplier          │
//! │  verify.rs       - Chain-link and crash point auditing      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod crash_point;
pub mod verify;

pub use crash_point::crash_point;
pub use verify::{
    previous_round_hash, verify_link, verify_revealed_rounds, verify_round,
    VerificationError,
};
