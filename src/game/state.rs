//! Game State Machine
//!
//! Owns a hash chain and a cursor into it. The cursor is a byte offset that
//! starts at the end of the chain and walks towards the start, one digest per
//! round, so rounds are revealed in the reverse of generation order.
//!
//! ```text
//!   cursor == len(chain)        Ready      (no round revealed yet)
//!   0 <= cursor < len(chain)    Active     (round at chain[cursor..cursor+32])
//!   cursor == -32               Exhausted
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::chain::{HashChain, MIN_ROUNDS};
use crate::core::hash::{RoundHash, HASH_SIZE};
use crate::core::multiplier::Multiplier;
use crate::error::{CrashError, Result};
use crate::game::config::GameConfig;
use crate::proof::crash_point::crash_point;

/// Cursor value of an exhausted game.
pub const EXHAUSTED_CURSOR: i64 = -(HASH_SIZE as i64);

const STEP: i64 = HASH_SIZE as i64;

// =============================================================================
// PHASE & ROUND
// =============================================================================

/// Where the game is in its chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Chain committed, no round revealed yet.
    Ready,
    /// A round is revealed and can be computed.
    Active,
    /// Every round has been played.
    Exhausted,
}

/// A revealed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based round number in play order.
    pub number: usize,
    /// Committed hash revealed for this round.
    #[serde(with = "hex::serde")]
    pub hash: RoundHash,
    /// Multiplier at which the round crashes.
    pub crash_point: Multiplier,
}

impl Round {
    /// Hex encoding of the round hash.
    pub fn hash_hex(&self) -> String {
        hex::encode(self.hash)
    }
}

// =============================================================================
// GAME
// =============================================================================

/// A single playthrough over one hash chain.
///
/// Not synchronized: confine each game to one owner.
#[derive(Clone, Debug)]
pub struct Game {
    chain: HashChain,
    cursor: i64,
    salt: Vec<u8>,
    instant_crash_rate: u32,
}

impl Game {
    /// Create a game from a seed, or restore one from persisted state.
    ///
    /// See [`GameConfig`] for how the chain and cursor options interact.
    pub fn new(seed: &[u8], config: GameConfig) -> Result<Self> {
        let GameConfig {
            salt,
            rounds,
            instant_crash_rate,
            chain,
            cursor,
        } = config;

        if instant_crash_rate == 0 {
            return Err(CrashError::InvalidState(
                "instant crash rate must be positive".into(),
            ));
        }

        let (chain, cursor) = match (chain, cursor) {
            (Some(bytes), Some(cursor)) => {
                let chain = HashChain::from_bytes(bytes)?;
                validate_cursor(&chain, cursor)?;
                debug!(rounds = chain.rounds(), cursor, "Restored game from persisted chain");
                (chain, cursor)
            }
            (Some(bytes), None) => {
                let chain = HashChain::from_bytes(bytes)?;
                if chain.rounds() < MIN_ROUNDS {
                    return Err(CrashError::TooFewRounds {
                        requested: chain.rounds(),
                        minimum: MIN_ROUNDS,
                    });
                }
                let cursor = chain.len() as i64;
                debug!(rounds = chain.rounds(), "Loaded game from supplied chain");
                (chain, cursor)
            }
            (None, cursor) => {
                let chain = HashChain::generate(seed, rounds)?;
                let cursor = match cursor {
                    Some(cursor) => {
                        validate_cursor(&chain, cursor)?;
                        cursor
                    }
                    None => chain.len() as i64,
                };
                debug!(rounds, cursor, "Generated hash chain");
                (chain, cursor)
            }
        };

        Ok(Self {
            chain,
            cursor,
            salt,
            instant_crash_rate,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        if self.cursor < 0 {
            GamePhase::Exhausted
        } else if self.cursor == self.chain.len() as i64 {
            GamePhase::Ready
        } else {
            GamePhase::Active
        }
    }

    /// Move to the next round.
    ///
    /// Returns `false` once no round remains; further calls keep returning
    /// `false` and leave the game untouched.
    pub fn advance(&mut self) -> bool {
        if self.cursor < 0 {
            return false;
        }

        self.cursor -= STEP;
        if self.cursor < 0 {
            self.cursor = EXHAUSTED_CURSOR;
            debug!(rounds = self.chain.rounds(), "Hash chain exhausted");
            return false;
        }

        trace!(cursor = self.cursor, round = self.rounds_played(), "Advanced round");
        true
    }

    /// Hash and crash point of the current round.
    ///
    /// Fails with [`CrashError::NoMoreRounds`] before the first advance and
    /// after exhaustion.
    pub fn current_round(&self) -> Result<Round> {
        if self.phase() != GamePhase::Active {
            return Err(CrashError::NoMoreRounds);
        }

        let hash = self
            .chain
            .digest_at(self.cursor as usize)
            .ok_or(CrashError::NoMoreRounds)?;

        Ok(Round {
            number: self.rounds_played(),
            hash,
            crash_point: crash_point(&hash, &self.salt, self.instant_crash_rate),
        })
    }

    /// Like [`Game::current_round`], but steps into the first round when the
    /// game is still [`GamePhase::Ready`].
    pub fn crash_point(&mut self) -> Result<Round> {
        if self.phase() == GamePhase::Ready {
            self.advance();
        }
        self.current_round()
    }

    /// Iterate the remaining rounds, advancing before each one.
    pub fn play(&mut self) -> Rounds<'_> {
        Rounds { game: self }
    }

    /// Number of rounds revealed so far. Stops growing once exhausted.
    pub fn rounds_played(&self) -> usize {
        let consumed = self.chain.len() as i64 - self.cursor.max(0);
        (consumed / STEP) as usize
    }

    /// Rounds not yet revealed.
    pub fn remaining_rounds(&self) -> usize {
        self.total_rounds() - self.rounds_played()
    }

    /// Rounds in the chain.
    pub fn total_rounds(&self) -> usize {
        self.chain.rounds()
    }

    /// Hash revealed in the first round. Publish this before play starts.
    pub fn first_round_hash(&self) -> RoundHash {
        self.chain.terminal_hash()
    }

    /// Copy of the chain buffer, for persistence.
    pub fn hash_chain(&self) -> Vec<u8> {
        self.chain.as_bytes().to_vec()
    }

    /// Cursor into the chain, for persistence.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Salt mixed into every crash point.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// Instant-crash divisor.
    pub fn instant_crash_rate(&self) -> u32 {
        self.instant_crash_rate
    }
}

fn validate_cursor(chain: &HashChain, cursor: i64) -> Result<()> {
    let len = chain.len() as i64;
    if cursor < EXHAUSTED_CURSOR || cursor > len {
        return Err(CrashError::InvalidState(format!(
            "cursor {} outside [{}, {}]",
            cursor, EXHAUSTED_CURSOR, len
        )));
    }
    if cursor % STEP != 0 {
        return Err(CrashError::InvalidState(format!(
            "cursor {} is not aligned to {} bytes",
            cursor, HASH_SIZE
        )));
    }
    Ok(())
}

/// Iterator returned by [`Game::play`].
pub struct Rounds<'a> {
    game: &'a mut Game,
}

impl Iterator for Rounds<'_> {
    type Item = Round;

    fn next(&mut self) -> Option<Round> {
        if !self.game.advance() {
            return None;
        }
        self.game.current_round().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.game.remaining_rounds();
        (remaining, Some(remaining))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::verify::{verify_revealed_rounds, verify_round};
    use proptest::prelude::*;

    const VECTOR_SEED: &[u8] = b"77b271fe12fca03c618f63dfb79d4105726ba9d4a25bb3f1964e435ccf9cb208";
    const VECTOR_SALT: &[u8] = b"0000000000000000000fa3b65e43e4240d71762a5bf397d5304b2596d116859c";
    const FIRST_ROUND_HASH: &str =
        "ec00cd71f6aca6bd8744fc5a95dd3b121be25d17e42da65ab85989c62b07e57c";

    fn seeded_game(rounds: usize) -> Game {
        Game::new(b"this is a seed", GameConfig::default().with_rounds(rounds)).unwrap()
    }

    #[test]
    fn test_known_first_round() {
        let mut game = Game::new(
            VECTOR_SEED,
            GameConfig::default().with_rounds(10).with_salt(VECTOR_SALT),
        )
        .unwrap();

        assert!(game.advance());
        let round = game.current_round().unwrap();
        assert_eq!(round.number, 1);
        assert_eq!(
            round.hash_hex(),
            "90e96b6acaca0f7299d1acbc20a290b5af61148596c9ad3df2d004588f525419"
        );
        assert_eq!(round.crash_point.to_string(), "10.41");
    }

    #[test]
    fn test_known_sequence() {
        let mut game = Game::new(
            VECTOR_SEED,
            GameConfig::default().with_rounds(10).with_salt(VECTOR_SALT),
        )
        .unwrap();

        let points: Vec<u64> = game.play().map(|r| r.crash_point.hundredths()).collect();
        assert_eq!(points, vec![1041, 246, 639, 603, 124, 161, 203, 100, 148, 116]);
    }

    #[test]
    fn test_custom_rate_sequence() {
        let mut game = Game::new(
            b"this is a seed",
            GameConfig::default()
                .with_rounds(10)
                .with_salt("this is a salt")
                .with_instant_crash_rate(30),
        )
        .unwrap();

        let points: Vec<u64> = game.play().map(|r| r.crash_point.hundredths()).collect();
        assert_eq!(points, vec![794, 382, 205, 305, 120, 660, 732, 438, 100, 144]);
    }

    #[test]
    fn test_round_count() {
        let mut game = seeded_game(10);
        let mut counter = 0;
        while game.advance() {
            counter += 1;
        }
        assert_eq!(counter, 10);
        assert_eq!(game.phase(), GamePhase::Exhausted);
    }

    #[test]
    fn test_rounds_played_saturates() {
        let mut game = seeded_game(10);
        assert_eq!(game.rounds_played(), 0);

        for _ in 0..5 {
            game.advance();
        }
        assert_eq!(game.rounds_played(), 5);

        for _ in 0..5 {
            game.advance();
        }
        assert_eq!(game.rounds_played(), 10);
        assert_eq!(game.remaining_rounds(), 0);

        assert!(!game.advance());
        assert!(!game.advance());
        assert_eq!(game.rounds_played(), 10);
        assert_eq!(game.cursor(), EXHAUSTED_CURSOR);
    }

    #[test]
    fn test_exhaustion_errors() {
        let mut game = seeded_game(2);
        assert!(game.advance());
        assert!(game.advance());
        assert!(game.current_round().is_ok());

        assert!(!game.advance());
        assert_eq!(game.current_round(), Err(CrashError::NoMoreRounds));
        assert_eq!(game.crash_point(), Err(CrashError::NoMoreRounds));
    }

    #[test]
    fn test_first_round_hash_invariant() {
        let mut game = seeded_game(10);
        assert_eq!(hex::encode(game.first_round_hash()), FIRST_ROUND_HASH);

        for _ in 0..12 {
            game.advance();
            assert_eq!(hex::encode(game.first_round_hash()), FIRST_ROUND_HASH);
        }
    }

    #[test]
    fn test_first_round_is_first_revealed() {
        let mut game = seeded_game(10);
        assert!(game.advance());
        assert_eq!(game.current_round().unwrap().hash, game.first_round_hash());
    }

    #[test]
    fn test_ready_has_no_current_round() {
        let game = seeded_game(3);
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.current_round(), Err(CrashError::NoMoreRounds));
    }

    #[test]
    fn test_crash_point_auto_advances_once() {
        let mut game = seeded_game(3);
        let first = game.crash_point().unwrap();
        assert_eq!(first.number, 1);
        assert_eq!(game.rounds_played(), 1);

        // No further implicit advance.
        let again = game.crash_point().unwrap();
        assert_eq!(first, again);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_current_round_idempotent() {
        let mut game = seeded_game(5);
        game.advance();
        game.advance();
        assert_eq!(game.current_round().unwrap(), game.current_round().unwrap());
    }

    #[test]
    fn test_too_few_rounds() {
        for rounds in [0, 1] {
            let result = Game::new(b"seed", GameConfig::default().with_rounds(rounds).with_salt("x"));
            assert!(matches!(result, Err(CrashError::TooFewRounds { .. })));
        }
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = Game::new(b"seed", GameConfig::default().with_instant_crash_rate(0));
        assert!(matches!(result, Err(CrashError::InvalidState(_))));
    }

    #[test]
    fn test_restore_skips_generation() {
        let mut original = seeded_game(10);
        original.advance();
        original.advance();

        // Seed and round count are irrelevant on the restoration path.
        let restored = Game::new(
            b"",
            GameConfig::default()
                .with_rounds(0)
                .with_hash_chain(original.hash_chain())
                .with_cursor(original.cursor()),
        )
        .unwrap();

        assert_eq!(restored.rounds_played(), 2);
        assert_eq!(restored.total_rounds(), 10);
        assert_eq!(restored.first_round_hash(), original.first_round_hash());
        assert_eq!(restored.current_round(), original.current_round());
    }

    #[test]
    fn test_restore_late_cursor() {
        let mut original = seeded_game(3);
        while original.advance() {}

        let restored = Game::new(
            b"",
            GameConfig::default()
                .with_hash_chain(original.hash_chain())
                .with_cursor(original.cursor()),
        )
        .unwrap();
        assert_eq!(restored.phase(), GamePhase::Exhausted);
        assert_eq!(restored.rounds_played(), 3);
    }

    #[test]
    fn test_restore_rejects_bad_state() {
        let chain = seeded_game(4).hash_chain();

        let cases = [
            GameConfig::default().with_hash_chain(chain.clone()).with_cursor(-64),
            GameConfig::default().with_hash_chain(chain.clone()).with_cursor(160),
            GameConfig::default().with_hash_chain(chain.clone()).with_cursor(33),
            GameConfig::default().with_hash_chain(vec![0u8; 40]).with_cursor(32),
            GameConfig::default().with_hash_chain(Vec::new()).with_cursor(0),
        ];

        for config in cases {
            assert!(matches!(Game::new(b"", config), Err(CrashError::InvalidState(_))));
        }
    }

    #[test]
    fn test_chain_only_validates_rounds() {
        let result = Game::new(b"", GameConfig::default().with_hash_chain(vec![7u8; 32]));
        assert!(matches!(result, Err(CrashError::TooFewRounds { requested: 1, .. })));

        let chain = seeded_game(4).hash_chain();
        let game = Game::new(b"", GameConfig::default().with_hash_chain(chain)).unwrap();
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.total_rounds(), 4);
    }

    #[test]
    fn test_cursor_only_resumes_generated_chain() {
        let mut original = seeded_game(6);
        original.advance();
        original.advance();
        original.advance();

        let resumed = Game::new(
            b"this is a seed",
            GameConfig::default().with_rounds(6).with_cursor(original.cursor()),
        )
        .unwrap();
        assert_eq!(resumed.current_round(), original.current_round());
    }

    #[test]
    fn test_revealed_rounds_audit() {
        let mut game = Game::new(
            b"this is a seed",
            GameConfig::default().with_rounds(50).with_salt("this is a salt").with_instant_crash_rate(30),
        )
        .unwrap();
        let commitment = game.first_round_hash();

        let rounds: Vec<Round> = game.play().collect();
        assert_eq!(rounds.len(), 50);

        let hashes: Vec<RoundHash> = rounds.iter().map(|r| r.hash).collect();
        assert!(verify_revealed_rounds(&commitment, &hashes).is_ok());
        for round in &rounds {
            assert!(verify_round(&round.hash, b"this is a salt", 30, round.crash_point).is_ok());
        }
    }

    #[test]
    fn test_play_size_hint() {
        let mut game = seeded_game(4);
        game.advance();
        assert_eq!(game.play().size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_round_serializes_hash_as_hex() {
        let mut game = seeded_game(10);
        let round = game.crash_point().unwrap();
        let json = serde_json::to_value(round).unwrap();
        assert_eq!(json["hash"], FIRST_ROUND_HASH);
        assert_eq!(json["number"], 1);
    }

    proptest! {
        #[test]
        fn prop_restoration_determinism(
            seed in proptest::collection::vec(any::<u8>(), 1..32),
            salt in proptest::collection::vec(any::<u8>(), 0..32),
            rounds in 2usize..20,
            played in 0usize..22,
            rate in 1u32..50,
        ) {
            let config = GameConfig::default()
                .with_rounds(rounds)
                .with_salt(salt.clone())
                .with_instant_crash_rate(rate);
            let mut original = Game::new(&seed, config).unwrap();
            for _ in 0..played {
                original.advance();
            }

            let mut restored = Game::new(
                b"",
                GameConfig::default()
                    .with_salt(salt)
                    .with_instant_crash_rate(rate)
                    .with_hash_chain(original.hash_chain())
                    .with_cursor(original.cursor()),
            )
            .unwrap();

            prop_assert_eq!(original.advance(), restored.advance());
            prop_assert_eq!(original.current_round(), restored.current_round());
            prop_assert_eq!(original.rounds_played(), restored.rounds_played());
        }

        #[test]
        fn prop_rounds_played_monotonic(rounds in 2usize..30, calls in 0usize..40) {
            let mut game = seeded_game(rounds);
            let mut last = game.rounds_played();
            for _ in 0..calls {
                game.advance();
                let now = game.rounds_played();
                prop_assert!(now >= last);
                prop_assert!(now <= rounds);
                last = now;
            }
        }
    }
}
