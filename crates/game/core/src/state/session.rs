use crate::config::BattleConfig;

/// The two sides that can hold the turn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Actor {
    Player = 0,
    Opponent = 1,
}

impl Actor {
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

/// Terminal result of a battle, always from the player's point of view.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}

bitflags::bitflags! {
    /// Phase and status booleans exposed to observers.
    ///
    /// This is a projection of the engine's phase machine and session guards;
    /// the engine never branches on these bits directly except `CONFUSED`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PhaseFlags: u8 {
        /// Opponent's heal-counter phase is in effect.
        const HEAL_COUNTER = 1 << 0;
        /// Opponent's rage phase has been announced.
        const RAGE_TRIGGERED = 1 << 1;
        /// Opponent's rage phase is currently active.
        const RAGE_ACTIVE = 1 << 2;
        /// Player will hurt themselves on their next basic attack.
        const CONFUSED = 1 << 3;
    }
}

/// Turn, gauge and outcome bookkeeping for one battle run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSession {
    /// Seed for every random roll in this run.
    pub seed: u64,
    /// Incremented once per resolved action; feeds roll derivation.
    pub nonce: u64,
    pub turn_owner: Actor,
    /// Set exactly once; never cleared until the session is reset.
    pub outcome: Option<BattleOutcome>,
    /// Consecutive basic attacks since the last special.
    pub attack_count: u32,
    pub confused: bool,
    /// Whole seconds of battle time; frozen once the battle is over.
    pub elapsed_seconds: u32,
    /// Outcome sequencer: the skip affordance has been revealed.
    pub skip_available: bool,
    /// Outcome sequencer: the scene transition has been requested.
    pub transition_requested: bool,
}

impl BattleSession {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            turn_owner: Actor::Player,
            outcome: None,
            attack_count: 0,
            confused: false,
            elapsed_seconds: 0,
            skip_available: false,
            transition_requested: false,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn special_ready(&self) -> bool {
        self.attack_count >= BattleConfig::SPECIAL_CHARGE
    }

    /// Returns the nonce for the action being resolved and advances it.
    pub fn next_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce = self.nonce.wrapping_add(1);
        nonce
    }
}
