//! Deterministic random rolls for damage, line selection and item outcomes.
//!
//! Every roll is derived from the battle seed, the action nonce, the acting
//! side and a roll context, so a battle replays identically given the same
//! seed and the same sequence of intents.

use crate::state::Actor;

/// Source of deterministic pseudo-random values.
///
/// Implementations must return the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Value in `[min, max]` inclusive. Returns `min` when the range is empty.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32(seed) % span)
    }

    /// Index in `[0, len)`. Returns 0 for empty or single-element pools.
    fn pick(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }

    /// True with probability `numerator / denominator`.
    fn chance(&self, seed: u64, numerator: u32, denominator: u32) -> bool {
        if denominator == 0 {
            return false;
        }
        self.next_u32(seed) % denominator < numerator
    }
}

/// PCG-XSH-RR: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Distinguishes independent rolls made while resolving one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Damage = 0,
    Line = 1,
    ItemOutcome = 2,
    Mitigation = 3,
}

/// Mix the battle seed, action nonce, acting side and roll context into a
/// per-roll seed (SplitMix64 / FxHash style avalanche).
pub fn compute_seed(battle_seed: u64, nonce: u64, actor: Actor, context: RollContext) -> u64 {
    let mut hash = battle_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
