//! Crash Chain demo
//!
//! Plays one game to exhaustion, then audits it the way an outside
//! observer would: from the published first round hash, the revealed round
//! hashes, the salt, and the instant-crash rate.

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crash_chain::{
    game::Round,
    proof::{verify_revealed_rounds, verify_round},
    Game, GameConfig, GameSnapshot, RoundHash, VERSION,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Crash Chain v{}", VERSION);

    let seed = std::env::var("CRASH_SEED").unwrap_or_else(|_| "this is a seed".to_string());
    let config = GameConfig::from_env();
    info!(
        "Rounds: {}, instant crash rate: 1/{}",
        config.rounds, config.instant_crash_rate
    );

    let salt = config.salt.clone();
    let rate = config.instant_crash_rate;
    let mut game = Game::new(seed.as_bytes(), config)?;

    let commitment = game.first_round_hash();
    info!("Commitment (first round hash): {}", hex::encode(commitment));

    // Play half, persist, resume, play the rest.
    let half = game.total_rounds() / 2;
    let mut revealed: Vec<Round> = game.play().take(half).collect();
    log_rounds(&revealed);

    let encoded = game.snapshot().to_json()?;
    info!("Snapshot taken at cursor {} ({} bytes JSON)", game.cursor(), encoded.len());

    let mut resumed = Game::from_snapshot(GameSnapshot::from_json(&encoded)?)?;
    let rest: Vec<Round> = resumed.play().collect();
    log_rounds(&rest);
    revealed.extend(rest);

    info!("=== Auditing {} rounds ===", revealed.len());
    let hashes: Vec<RoundHash> = revealed.iter().map(|r| r.hash).collect();
    verify_revealed_rounds(&commitment, &hashes).context("hash chain audit failed")?;

    let mut instant = 0;
    for round in &revealed {
        if let Err(e) = verify_round(&round.hash, &salt, rate, round.crash_point) {
            warn!("Round {} failed audit: {}", round.number, e);
            bail!("crash point audit failed");
        }
        if round.crash_point.is_instant_crash() {
            instant += 1;
        }
    }

    info!(
        "AUDIT PASSED: {} rounds verified, {} instant crashes",
        revealed.len(),
        instant
    );
    Ok(())
}

fn log_rounds(rounds: &[Round]) {
    for round in rounds {
        info!(
            "Round {:>4}: {}x  {}",
            round.number,
            round.crash_point,
            round.hash_hex()
        );
    }
}
