//! Cues the engine emits for the presentation layer.

use crate::screen::{EncounterId, Screen};
use crate::state::BattleOutcome;

/// Opponent phases that announce themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseId {
    HealCounter,
    Rage,
}

/// Background music selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MusicCue {
    Battle,
    HealCounterTheme,
    RageTheme,
    Victory,
    Defeat,
}

/// Discrete battle happenings, in emission order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted { encounter: EncounterId },
    PhaseChanged { phase: PhaseId, active: bool },
    MusicChanged(MusicCue),
    BattleEnded { outcome: BattleOutcome, elapsed_seconds: u32 },
    SkipAvailable,
    TransitionRequested { screen: Screen },
}

impl BattleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BattleStarted { .. } => "battle_started",
            Self::PhaseChanged { .. } => "phase_changed",
            Self::MusicChanged(_) => "music_changed",
            Self::BattleEnded { .. } => "battle_ended",
            Self::SkipAvailable => "skip_available",
            Self::TransitionRequested { .. } => "transition_requested",
        }
    }
}
