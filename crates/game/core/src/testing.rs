//! Small encounter fixtures and scripted RNGs for unit tests.

use crate::encounter::{
    ActionNarration, CombatantTemplate, DamageRange, EncounterConfig, HealCounterScript, Odds,
    OutcomeScript, PhaseScript, RageScript, ScriptedLine, Speaker, TransitionAnchor, TurnTimings,
};
use crate::rng::RngOracle;
use crate::screen::{EncounterId, Screen};

/// Returns the same raw value for every roll.
///
/// `FixedRng(0)` makes every range roll its minimum, every pool pick its
/// first entry and every non-zero chance succeed.
#[derive(Clone, Copy, Debug)]
pub struct FixedRng(pub u32);

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

fn line(delay_ms: u64, speaker: Speaker, text: &str) -> ScriptedLine {
    ScriptedLine {
        delay_ms,
        speaker,
        text: text.to_owned(),
    }
}

fn lines(spacing_ms: u64, texts: &[&str]) -> Vec<ScriptedLine> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| line(index as u64 * spacing_ms, Speaker::System, text))
        .collect()
}

fn strings(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| (*text).to_owned()).collect()
}

fn narration() -> ActionNarration {
    ActionNarration {
        attack_speech: strings(&["Take this!", "Again!"]),
        attack_report: "{player} hits {opponent} for {amount}.".into(),
        special_speech: strings(&["Special!"]),
        special_report: "{player}'s special deals {amount}.".into(),
        confused_attack: "{player} is confused and takes {amount}.".into(),
        flee_speech: "Let's run.".into(),
        flee_report: "Running costs {player} {amount} HP.".into(),
        item_speech: "Cheers!".into(),
        item_full_heal: "{player} recovers {amount} HP.".into(),
        item_backfires: strings(&[
            "Spilled it. {amount} damage.",
            "Too strong. {amount} damage.",
            "The room spins. {amount} damage.",
        ]),
        item_confusing_backfire: 2,
        opponent_attack_speech: strings(&["Hah!"]),
        opponent_attack_report: "{opponent} hits {player} for {amount}.".into(),
        comment_heal_report: "{audience} heals {player} by {amount}.".into(),
    }
}

fn player() -> CombatantTemplate {
    CombatantTemplate {
        name: "Toru".into(),
        max_hp: 100,
        attack: DamageRange { min: 15, max: 30 },
        special_power: 50,
    }
}

/// Heal-counter encounter with immediate turn hand-back.
pub fn heal_counter_encounter() -> EncounterConfig {
    EncounterConfig {
        id: EncounterId::First,
        player: player(),
        opponent: CombatantTemplate {
            name: "Soso".into(),
            max_hp: 100,
            attack: DamageRange { min: 5, max: 15 },
            special_power: 0,
        },
        audience: "Fan".into(),
        special_floor: 30,
        timings: TurnTimings {
            opponent_reply_ms: 1_500,
            player_return_ms: 0,
        },
        intro: vec![line(0, Speaker::System, "Battle start!")],
        narration: narration(),
        phase: PhaseScript::HealCounter(HealCounterScript {
            threshold_hp: 30,
            announcement: vec![
                line(0, Speaker::System, "{opponent} calls for help!"),
                line(1_000, Speaker::Opponent, "Come on in!"),
                line(2_000, Speaker::System, "Allies joined."),
            ],
            heal: 15,
            attack_increment: 5,
            counter_damage: DamageRange { min: 10, max: 40 },
            speech: strings(&["Heal me!"]),
            heal_report: "{opponent} recovers {amount}.".into(),
            report: "{player} takes {amount} from the counter.".into(),
        }),
        victory: OutcomeScript {
            lines: lines(3_000, &["Won.", "Level up.", "Drink.", "Gout.", "Stream ended."]),
            skip_after_ms: 10_000,
            transition_delay_ms: 20_000,
            transition_anchor: TransitionAnchor::FinalLine,
            next_screen: Screen::Victory1,
        },
        defeat: OutcomeScript {
            lines: lines(3_000, &["Lost.", "a", "b", "c", "d", "e", "Stream ended."]),
            skip_after_ms: 15_000,
            transition_delay_ms: 20_000,
            transition_anchor: TransitionAnchor::FinalLine,
            next_screen: Screen::Result1,
        },
    }
}

/// Rage encounter with a delayed hand-back and a delayed intro.
pub fn rage_encounter() -> EncounterConfig {
    EncounterConfig {
        id: EncounterId::Second,
        player: player(),
        opponent: CombatantTemplate {
            name: "Yuji".into(),
            max_hp: 100,
            attack: DamageRange { min: 10, max: 20 },
            special_power: 0,
        },
        audience: "Fan".into(),
        special_floor: 30,
        timings: TurnTimings {
            opponent_reply_ms: 1_500,
            player_return_ms: 1_500,
        },
        intro: vec![
            line(1_000, Speaker::System, "Second battle!"),
            line(1_000, Speaker::Opponent, "Hello."),
        ],
        narration: narration(),
        phase: PhaseScript::Rage(RageScript {
            threshold_hp: 20,
            announcement: vec![
                line(0, Speaker::Opponent, "Please fund me!"),
                line(1_000, Speaker::System, "Funding reached."),
                line(1_000, Speaker::System, "HP fully restored."),
                line(1_000, Speaker::System, "Trait unlocked."),
            ],
            activation_delay_ms: 1_000,
            duration_ticks: 40,
            mitigation: Odds {
                numerator: 2,
                denominator: 3,
            },
            mitigated_damage: 5,
            special_damage: 10,
            hesitate_below_percent: Some(30),
            speech: strings(&["Jackpot!"]),
            expiry: "{opponent}'s rage has ended.".into(),
        }),
        victory: OutcomeScript {
            lines: lines(3_000, &["1", "2", "3", "4", "5", "6"]),
            skip_after_ms: 10_000,
            transition_delay_ms: 30_000,
            transition_anchor: TransitionAnchor::BattleEnd,
            next_screen: Screen::Victory2,
        },
        defeat: OutcomeScript {
            lines: lines(3_000, &["1", "2", "3", "4", "5"]),
            skip_after_ms: 15_000,
            transition_delay_ms: 30_000,
            transition_anchor: TransitionAnchor::BattleEnd,
            next_screen: Screen::Result2,
        },
    }
}
