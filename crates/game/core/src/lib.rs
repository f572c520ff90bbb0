//! Deterministic battle rules for the live-stream battle game.
//!
//! `game-core` defines the canonical battle state machine and the types the
//! runtime, content and client crates share. It performs no I/O and reads no
//! clocks: all state mutation flows through [`engine::BattleEngine`], which
//! paces delayed work on its own virtual clock.
pub mod config;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod event;
pub mod handoff;
pub mod rng;
pub mod screen;
pub mod state;
pub mod view;

pub use config::{BattleConfig, Millis};
pub use encounter::{
    ActionNarration, CombatantTemplate, DamageRange, EncounterConfig, EncounterError,
    HealCounterScript, Odds, OutcomeScript, PhaseScript, RageScript, ScriptedLine, Speaker,
    TransitionAnchor, TurnTimings,
};
pub use engine::{BattleEngine, BattleTask, IntentOutcome, PhaseStage, Scheduler, TaskHandle};
pub use error::{ErrorSeverity, IgnoreReason};
pub use event::{BattleEvent, MusicCue, PhaseId};
pub use handoff::{FINAL_BATTLE_TIME, FROM_DEFEAT, SessionHandoff, format_battle_time};
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed};
pub use screen::{EncounterId, Screen};
pub use state::{
    Actor, BattleOutcome, BattleSession, Combatant, LineVars, NarrationEntry, NarrationLog,
    PhaseFlags, SYSTEM_SPEAKER,
};
pub use view::{BattleSnapshot, CombatantView};

#[cfg(test)]
pub(crate) mod testing;
