//! Authoritative battle state.
//!
//! The two combatants, the session bookkeeping and the narration log. The
//! runtime reads this state through snapshots and mutates it exclusively
//! through [`crate::engine::BattleEngine`].
mod combatant;
mod narration;
mod session;

pub use combatant::Combatant;
pub use narration::{LineVars, NarrationEntry, NarrationLog, SYSTEM_SPEAKER};
pub use session::{Actor, BattleOutcome, BattleSession, PhaseFlags};
