//! Plain-text rendering of battle state and events.

use game_core::{
    Actor, BattleConfig, BattleEvent, BattleSnapshot, CombatantView, IgnoreReason, MusicCue,
    NarrationEntry, PhaseFlags, PhaseId, Screen, SessionHandoff,
};
use runtime::PlayerIntent;

fn hp(view: &CombatantView) -> String {
    format!("{} {}/{}", view.name, view.current_hp, view.max_hp)
}

/// One-line battle status.
pub fn status_line(snapshot: &BattleSnapshot) -> String {
    let turn = match (snapshot.outcome, snapshot.turn_owner) {
        (Some(outcome), _) => outcome.to_string(),
        (None, Actor::Player) => "your turn".to_owned(),
        (None, Actor::Opponent) => format!("{}'s turn", snapshot.opponent.name),
    };
    let charge = snapshot.attack_count.min(BattleConfig::SPECIAL_CHARGE);

    let mut line = format!(
        "[{}] {} | {} | {} | special {}/{}",
        snapshot.battle_time(),
        hp(&snapshot.player),
        hp(&snapshot.opponent),
        turn,
        charge,
        BattleConfig::SPECIAL_CHARGE,
    );
    for (flag, label) in [
        (PhaseFlags::HEAL_COUNTER, "collab"),
        (PhaseFlags::RAGE_ACTIVE, "rage"),
        (PhaseFlags::CONFUSED, "confused"),
    ] {
        if snapshot.phase_flags.contains(flag) {
            line.push_str(" [");
            line.push_str(label);
            line.push(']');
        }
    }
    if snapshot.skip_available {
        line.push_str(" (skip available)");
    }
    line
}

pub fn narration_line(entry: &NarrationEntry) -> String {
    if entry.is_system {
        format!("  * {}", entry.text)
    } else {
        format!("  {}: {}", entry.speaker, entry.text)
    }
}

/// Text for a battle cue, if it is worth showing.
pub fn cue_line(event: &BattleEvent) -> Option<String> {
    let line = match event {
        BattleEvent::BattleStarted { encounter } => format!("== battle {encounter} =="),
        BattleEvent::PhaseChanged { phase, active } => {
            let name = match phase {
                PhaseId::HealCounter => "heal counter",
                PhaseId::Rage => "rage",
            };
            let state = if *active { "begins" } else { "ends" };
            format!("-- {name} {state} --")
        }
        BattleEvent::MusicChanged(cue) => format!("♪ {}", music_name(*cue)),
        BattleEvent::BattleEnded {
            outcome,
            elapsed_seconds,
        } => format!(
            "== {outcome} after {} ==",
            game_core::format_battle_time(*elapsed_seconds)
        ),
        BattleEvent::SkipAvailable => "(type `skip` to move on)".to_owned(),
        BattleEvent::TransitionRequested { .. } => return None,
    };
    Some(line)
}

fn music_name(cue: MusicCue) -> &'static str {
    match cue {
        MusicCue::Battle => "battle theme",
        MusicCue::HealCounterTheme => "collab theme",
        MusicCue::RageTheme => "rage theme",
        MusicCue::Victory => "victory fanfare",
        MusicCue::Defeat => "defeat theme",
    }
}

pub fn ignored_line(intent: &PlayerIntent, reason: IgnoreReason) -> String {
    format!("({} ignored: {reason})", intent.as_str())
}

/// Banner printed on entering a screen.
pub fn screen_banner(screen: Screen, handoff: &SessionHandoff) -> String {
    let time = handoff.final_battle_time().unwrap_or("--:--");
    match screen {
        Screen::Index => "LIVE STREAM BATTLE\n(type `continue` to begin)".to_owned(),
        Screen::Start => "The stream is starting...".to_owned(),
        Screen::Battle1 | Screen::Battle2 => String::new(),
        Screen::Victory1 | Screen::Victory2 => {
            format!("VICTORY  battle time {time}\n(continue | retry | title)")
        }
        Screen::Result1 | Screen::Result2 => {
            format!("DEFEAT  battle time {time}\n(continue | retry | title)")
        }
        Screen::Select => "The next challenger awaits.\n(continue)".to_owned(),
        Screen::EndingA => "ENDING A: The stream goes on.\n(retry | title)".to_owned(),
        Screen::EndingB => "ENDING B: A quiet retirement.\n(retry | title)".to_owned(),
        Screen::EndingC => "ENDING C: The comeback.\n(retry | title)".to_owned(),
    }
}
