//! Seedable battle RNG
//!
//! All randomness in a battle flows through a single `Lcg64Xsh32` generator,
//! so a fixed seed reproduces the full event log draw for draw. Callers that
//! want a different generator can pass any `impl Rng` to the battle functions.

use rand::SeedableRng;
use rand_pcg::Lcg64Xsh32;

/// The generator a battle owns by default.
pub type BattleRng = Lcg64Xsh32;

/// Build a `BattleRng` from a `u64` seed by duplicating its little-endian
/// bytes into the generator's 16-byte seed.
pub fn seeded(seed: u64) -> BattleRng {
    let mut seed_bytes = [0u8; 16];
    seed_bytes[0..8].copy_from_slice(&seed.to_le_bytes());
    seed_bytes[8..16].copy_from_slice(&seed.to_le_bytes());
    Lcg64Xsh32::from_seed(seed_bytes)
}

/// Build a `BattleRng` from OS entropy, for callers that do not care about
/// replay (the demo binary, mostly).
pub fn from_entropy() -> BattleRng {
    Lcg64Xsh32::from_entropy()
}
