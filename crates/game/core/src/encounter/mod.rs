//! Authored encounter definitions.
//!
//! An [`EncounterConfig`] carries everything that differs between the two
//! battles: stat tables, pacing, narration pools, the opponent's phase script
//! and the two outcome scripts. Content crates build these from data files;
//! the engine treats them as read-only.
mod validate;

pub use validate::EncounterError;

use crate::config::Millis;
use crate::screen::{EncounterId, Screen};
use crate::state::BattleOutcome;

/// Inclusive damage interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn fixed(value: u32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// `numerator` in `denominator` odds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Odds {
    pub numerator: u32,
    pub denominator: u32,
}

/// Starting stats for one side.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    pub max_hp: u32,
    pub attack: DamageRange,
    /// Upper bound of the special move's damage roll.
    pub special_power: u32,
}

/// Who voices a scripted line. Names are resolved from the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speaker {
    System,
    Player,
    Opponent,
    Audience,
}

/// A narration line played `delay_ms` after its script starts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptedLine {
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay_ms: Millis,
    pub speaker: Speaker,
    pub text: String,
}

/// Turn pacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnTimings {
    /// From a resolved player action to the opponent's automatic action.
    pub opponent_reply_ms: Millis,
    /// From the opponent's action to control returning to the player.
    /// Zero hands the turn back immediately.
    pub player_return_ms: Millis,
}

/// Narration pools and report templates for the standard actions.
///
/// Speech pools are voiced by the acting side; report templates are
/// system lines rendered with [`crate::state::LineVars`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionNarration {
    pub attack_speech: Vec<String>,
    pub attack_report: String,
    pub special_speech: Vec<String>,
    pub special_report: String,
    pub confused_attack: String,
    pub flee_speech: String,
    pub flee_report: String,
    pub item_speech: String,
    pub item_full_heal: String,
    /// Backfire outcomes when the drink is taken above half HP.
    pub item_backfires: Vec<String>,
    /// Index into `item_backfires` that leaves the player confused.
    pub item_confusing_backfire: usize,
    pub opponent_attack_speech: Vec<String>,
    pub opponent_attack_report: String,
    pub comment_heal_report: String,
}

/// Heal-counter: the opponent stops attacking normally and instead heals,
/// grows stronger and counter-attacks on every turn for the rest of the battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealCounterScript {
    /// Triggers when the opponent's HP is at or below this value.
    pub threshold_hp: u32,
    pub announcement: Vec<ScriptedLine>,
    pub heal: u32,
    pub attack_increment: u32,
    pub counter_damage: DamageRange,
    pub speech: Vec<String>,
    /// Rendered with the HP actually restored.
    pub heal_report: String,
    /// Rendered with the counter damage dealt.
    pub report: String,
}

/// Rage: the opponent restores to full HP and shrugs off most damage for a
/// fixed number of ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RageScript {
    pub threshold_hp: u32,
    pub announcement: Vec<ScriptedLine>,
    /// Delay from trigger to the full restore and the start of the countdown.
    pub activation_delay_ms: Millis,
    pub duration_ticks: u32,
    /// Odds that a basic attack against the raging opponent is mitigated.
    pub mitigation: Odds,
    pub mitigated_damage: u32,
    /// Fixed special-move damage against the raging opponent.
    pub special_damage: u32,
    /// Before rage triggers, the opponent passes its turn below this HP percentage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hesitate_below_percent: Option<u32>,
    pub speech: Vec<String>,
    pub expiry: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseScript {
    None,
    HealCounter(HealCounterScript),
    Rage(RageScript),
}

/// Where the auto-transition delay is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionAnchor {
    /// The moment the battle ended.
    BattleEnd,
    /// The last scripted outcome line.
    FinalLine,
}

/// Post-battle narration, skip reveal and scene transition for one outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeScript {
    pub lines: Vec<ScriptedLine>,
    pub skip_after_ms: Millis,
    pub transition_delay_ms: Millis,
    pub transition_anchor: TransitionAnchor,
    pub next_screen: Screen,
}

impl OutcomeScript {
    /// Delay from battle end to the automatic transition.
    pub fn transition_due_ms(&self) -> Millis {
        let anchor = match self.transition_anchor {
            TransitionAnchor::BattleEnd => 0,
            TransitionAnchor::FinalLine => {
                self.lines.iter().map(|line| line.delay_ms).max().unwrap_or(0)
            }
        };
        anchor.saturating_add(self.transition_delay_ms)
    }
}

/// Complete definition of one battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    pub id: EncounterId,
    pub player: CombatantTemplate,
    pub opponent: CombatantTemplate,
    /// Display name for spectator comments.
    pub audience: String,
    /// Lower bound of the special move's damage roll.
    pub special_floor: u32,
    pub timings: TurnTimings,
    pub intro: Vec<ScriptedLine>,
    pub narration: ActionNarration,
    pub phase: PhaseScript,
    pub victory: OutcomeScript,
    pub defeat: OutcomeScript,
}

impl EncounterConfig {
    pub fn outcome_script(&self, outcome: BattleOutcome) -> &OutcomeScript {
        match outcome {
            BattleOutcome::Victory => &self.victory,
            BattleOutcome::Defeat => &self.defeat,
        }
    }

    /// Display name for a scripted speaker.
    pub fn speaker_name(&self, speaker: Speaker) -> Option<&str> {
        match speaker {
            Speaker::System => None,
            Speaker::Player => Some(&self.player.name),
            Speaker::Opponent => Some(&self.opponent.name),
            Speaker::Audience => Some(&self.audience),
        }
    }
}
