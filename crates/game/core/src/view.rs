//! Read-only views for presentation layers.

use crate::config::Millis;
use crate::handoff::format_battle_time;
use crate::screen::EncounterId;
use crate::state::{Actor, BattleOutcome, Combatant, NarrationEntry, PhaseFlags};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantView {
    pub name: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub attack_min: u32,
    pub attack_max: u32,
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        let attack = combatant.attack();
        Self {
            name: combatant.name().to_owned(),
            current_hp: combatant.current_hp(),
            max_hp: combatant.max_hp(),
            attack_min: attack.min,
            attack_max: attack.max,
        }
    }
}

/// Everything a battle screen renders, captured at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub encounter: EncounterId,
    pub clock_ms: Millis,
    pub player: CombatantView,
    pub opponent: CombatantView,
    pub turn_owner: Actor,
    pub is_over: bool,
    pub outcome: Option<BattleOutcome>,
    pub attack_count: u32,
    pub special_ready: bool,
    pub phase_flags: PhaseFlags,
    pub elapsed_seconds: u32,
    pub skip_available: bool,
    pub narration: Vec<NarrationEntry>,
}

impl BattleSnapshot {
    /// Elapsed battle time as `MM:SS`.
    pub fn battle_time(&self) -> String {
        format_battle_time(self.elapsed_seconds)
    }

    pub fn player_can_act(&self) -> bool {
        !self.is_over && self.turn_owner == Actor::Player
    }
}
