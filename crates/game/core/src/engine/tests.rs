use super::*;
use crate::encounter::{DamageRange, EncounterError, PhaseScript};
use crate::event::{BattleEvent, MusicCue, PhaseId};
use crate::screen::Screen;
use crate::state::{BattleOutcome, PhaseFlags};
use crate::testing::{FixedRng, heal_counter_encounter, rage_encounter};

fn started(config: EncounterConfig, raw: u32) -> BattleEngine<FixedRng> {
    let mut engine = BattleEngine::with_rng(config, 7, FixedRng(raw));
    engine.start();
    engine.drain_events();
    engine
}

/// Submits one player intent, then advances until control returns or the battle ends.
fn exchange<R: RngOracle>(
    engine: &mut BattleEngine<R>,
    intent: fn(&mut BattleEngine<R>) -> IntentOutcome,
) -> IntentOutcome {
    let outcome = intent(engine);
    for _ in 0..100 {
        if engine.session().is_over() || engine.can_act(Actor::Player) {
            break;
        }
        engine.advance_by(100);
    }
    outcome
}

fn last_text<R: RngOracle>(engine: &BattleEngine<R>) -> &str {
    engine
        .narration()
        .last()
        .map(|entry| entry.text.as_str())
        .unwrap_or_default()
}

/// Drives the heal-counter fixture to victory with maximum rolls.
///
/// Player hits for 30 every time: 100 -> 70 -> 40 -> 10 (heal counter
/// triggers, opponent heals back to 25) -> 0.
fn win_heal_counter_battle() -> BattleEngine<FixedRng> {
    let mut engine = started(heal_counter_encounter(), u32::MAX);
    exchange(&mut engine, BattleEngine::attack);
    exchange(&mut engine, BattleEngine::attack);
    exchange(&mut engine, BattleEngine::attack);
    assert_eq!(engine.opponent().current_hp(), 25);
    assert_eq!(engine.attack(), IntentOutcome::Applied);
    engine
}

#[test]
fn start_plays_intro_and_schedules_tick() {
    let mut engine = BattleEngine::with_rng(heal_counter_encounter(), 1, FixedRng(0));
    engine.start();

    assert_eq!(
        engine.drain_events(),
        vec![
            BattleEvent::BattleStarted {
                encounter: crate::screen::EncounterId::First
            },
            BattleEvent::MusicChanged(MusicCue::Battle),
        ]
    );
    assert_eq!(engine.narration().len(), 1);
    assert_eq!(last_text(&engine), "Battle start!");
    assert!(engine.narration().entries()[0].is_system);
    assert!(engine.can_act(Actor::Player));
    assert_eq!(engine.next_due(), Some(1_000));
}

#[test]
fn delayed_intro_lines_arrive_on_the_clock() {
    let mut engine = started(rage_encounter(), 0);
    assert!(engine.narration().is_empty());

    engine.advance_by(1_000);
    let speakers: Vec<_> = engine
        .narration()
        .iter()
        .map(|entry| entry.speaker.as_str())
        .collect();
    assert_eq!(speakers, vec!["system", "Yuji"]);
}

#[test]
fn attack_flips_turn_and_opponent_replies_after_delay() {
    let mut engine = started(heal_counter_encounter(), 0);

    assert_eq!(engine.attack(), IntentOutcome::Applied);
    // Minimum roll of 15..=30.
    assert_eq!(engine.opponent().current_hp(), 85);
    assert_eq!(engine.session().attack_count, 1);
    assert_eq!(engine.session().turn_owner, Actor::Opponent);
    assert_eq!(last_text(&engine), "Toru hits Soso for 15.");

    // A second tap before the reply is ignored.
    assert_eq!(
        engine.attack(),
        IntentOutcome::Ignored(IgnoreReason::NotPlayerTurn)
    );
    assert_eq!(engine.opponent().current_hp(), 85);

    engine.advance_by(1_499);
    assert_eq!(engine.player().current_hp(), 100);

    engine.advance_by(1);
    // Minimum roll of 5..=15, and the turn comes straight back.
    assert_eq!(engine.player().current_hp(), 95);
    assert!(engine.can_act(Actor::Player));
}

#[test]
fn special_is_gated_by_three_attacks() {
    let mut engine = started(heal_counter_encounter(), 0);
    let before = engine.snapshot();

    assert_eq!(
        engine.special(),
        IntentOutcome::Ignored(IgnoreReason::SpecialNotReady)
    );
    assert_eq!(engine.snapshot(), before);

    for _ in 0..3 {
        exchange(&mut engine, BattleEngine::attack);
    }
    assert!(engine.snapshot().special_ready);
    assert_eq!(engine.opponent().current_hp(), 55);

    assert_eq!(engine.special(), IntentOutcome::Applied);
    // Minimum roll of 30..=50 resets the gauge.
    assert_eq!(engine.opponent().current_hp(), 25);
    assert_eq!(engine.session().attack_count, 0);
    assert!(!engine.snapshot().special_ready);
}

#[test]
fn flee_costs_ten_hp_and_passes_the_turn() {
    let mut engine = started(heal_counter_encounter(), 0);

    assert_eq!(engine.flee(), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 90);
    assert_eq!(engine.session().turn_owner, Actor::Opponent);
    let last = engine.narration().last().cloned();
    assert!(last.is_some_and(|entry| entry.is_system));
    // Fleeing never charges the special.
    assert_eq!(engine.session().attack_count, 0);
}

#[test]
fn drink_backfire_confuses_and_next_attack_hurts_the_player() {
    // Raw value 2 selects the third backfire, which confuses.
    let mut engine = started(heal_counter_encounter(), 2);

    assert_eq!(engine.use_item(), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 90);
    assert!(engine.snapshot().phase_flags.contains(PhaseFlags::CONFUSED));
    assert_eq!(last_text(&engine), "The room spins. 10 damage.");

    engine.advance_by(1_500);
    // 5 + (2 % 11) = 7
    assert_eq!(engine.player().current_hp(), 83);

    assert_eq!(engine.attack(), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 73);
    assert_eq!(engine.opponent().current_hp(), 100);
    assert!(!engine.session().confused);
    assert_eq!(engine.session().attack_count, 0);
    assert_eq!(last_text(&engine), "Toru is confused and takes 10.");
}

#[test]
fn drink_below_half_restores_full_hp() {
    let mut engine = started(heal_counter_encounter(), 0);
    // Each exchange: flee for 10, then the opponent's minimum hit of 5.
    for _ in 0..4 {
        exchange(&mut engine, BattleEngine::flee);
    }
    assert_eq!(engine.player().current_hp(), 40);

    assert_eq!(engine.use_item(), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 100);
    assert_eq!(last_text(&engine), "Toru recovers 60 HP.");
}

#[test]
fn comments_heal_by_length_only_when_wounded() {
    let mut engine = started(heal_counter_encounter(), 0);

    assert_eq!(engine.submit_comment("nice"), IntentOutcome::Applied);
    assert_eq!(engine.narration().len(), 2);
    let comment = &engine.narration().entries()[1];
    assert_eq!(comment.speaker, "Fan");
    assert!(!comment.is_system);
    assert_eq!(engine.player().current_hp(), 100);

    exchange(&mut engine, BattleEngine::flee);
    assert_eq!(engine.player().current_hp(), 85);

    // 13 characters heal floor(13 / 5) = 2.
    assert_eq!(engine.submit_comment("hello world!!"), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 87);
    assert_eq!(last_text(&engine), "Fan heals Toru by 2.");

    let len = engine.narration().len();
    assert_eq!(
        engine.submit_comment("   "),
        IntentOutcome::Ignored(IgnoreReason::EmptyComment)
    );
    assert_eq!(engine.narration().len(), len);

    // Caps at 15 per comment and at max HP overall.
    engine.submit_comment(&"w".repeat(100));
    assert_eq!(engine.player().current_hp(), 100);
    assert_eq!(last_text(&engine), "Fan heals Toru by 15.");
}

#[test]
fn comments_count_characters_not_bytes() {
    let mut engine = started(heal_counter_encounter(), 0);
    exchange(&mut engine, BattleEngine::flee);
    let before = engine.player().current_hp();

    // Eleven three-byte characters heal 2, not 6.
    engine.submit_comment("がんばれがんばれ応援中");
    assert_eq!(engine.player().current_hp(), before + 2);
}

#[test]
fn heal_counter_triggers_once_and_replaces_opponent_attack() {
    let mut engine = started(heal_counter_encounter(), 0);
    for _ in 0..4 {
        exchange(&mut engine, BattleEngine::attack);
    }
    assert_eq!(engine.opponent().current_hp(), 40);
    engine.drain_events();

    engine.attack();
    assert_eq!(engine.opponent().current_hp(), 25);
    assert_eq!(
        engine.drain_events(),
        vec![
            BattleEvent::PhaseChanged {
                phase: PhaseId::HealCounter,
                active: true
            },
            BattleEvent::MusicChanged(MusicCue::HealCounterTheme),
        ]
    );
    assert_eq!(last_text(&engine), "Soso calls for help!");
    assert!(engine.snapshot().phase_flags.contains(PhaseFlags::HEAL_COUNTER));

    let player_before = engine.player().current_hp();
    engine.advance_by(1_500);
    // Heals 15, grows by 5 on both ends, counters for the minimum 10.
    assert_eq!(engine.opponent().current_hp(), 40);
    assert_eq!(engine.opponent().attack(), DamageRange { min: 10, max: 20 });
    assert_eq!(engine.player().current_hp(), player_before - 10);

    exchange(&mut engine, BattleEngine::attack);
    // Second opponent turn stacks the boost; no second trigger.
    assert_eq!(engine.opponent().attack(), DamageRange { min: 15, max: 25 });
    assert!(
        !engine
            .drain_events()
            .iter()
            .any(|event| matches!(event, BattleEvent::PhaseChanged { .. }))
    );
}

#[test]
fn victory_freezes_state_and_runs_outcome_script() {
    let mut engine = win_heal_counter_battle();

    let snapshot = engine.snapshot();
    assert!(snapshot.is_over);
    assert_eq!(snapshot.outcome, Some(BattleOutcome::Victory));
    assert_eq!(engine.opponent().current_hp(), 0);
    let events = engine.drain_events();
    assert!(events.contains(&BattleEvent::MusicChanged(MusicCue::Victory)));
    assert!(
        events
            .iter()
            .any(|event| matches!(event, BattleEvent::BattleEnded { outcome: BattleOutcome::Victory, .. }))
    );
    assert_eq!(last_text(&engine), "Won.");
    assert!(engine.scheduler().iter().all(|(_, task)| task.is_outcome()));

    let player_hp = engine.player().current_hp();
    assert_eq!(engine.attack(), IntentOutcome::Ignored(IgnoreReason::BattleOver));
    assert_eq!(engine.flee(), IntentOutcome::Ignored(IgnoreReason::BattleOver));
    assert_eq!(engine.use_item(), IntentOutcome::Ignored(IgnoreReason::BattleOver));
    assert_eq!(engine.special(), IntentOutcome::Ignored(IgnoreReason::BattleOver));
    assert_eq!(engine.player().current_hp(), player_hp);

    let elapsed = engine.session().elapsed_seconds;
    engine.advance_by(5_000);
    assert_eq!(engine.session().elapsed_seconds, elapsed);
    assert_eq!(
        engine.request_skip(),
        IntentOutcome::Ignored(IgnoreReason::SkipUnavailable)
    );

    engine.advance_by(5_000);
    assert!(engine.drain_events().contains(&BattleEvent::SkipAvailable));
    assert!(engine.snapshot().skip_available);

    assert_eq!(engine.request_skip(), IntentOutcome::Applied);
    assert_eq!(
        engine.drain_events(),
        vec![BattleEvent::TransitionRequested {
            screen: Screen::Victory1
        }]
    );
    assert_eq!(
        engine.request_skip(),
        IntentOutcome::Ignored(IgnoreReason::SkipUnavailable)
    );
    assert!(engine.scheduler().is_empty());

    engine.advance_by(60_000);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn transition_fires_once_after_final_line_plus_delay() {
    let mut engine = win_heal_counter_battle();
    let end = engine.clock();
    engine.drain_events();

    // Final line at +12s, transition 20s after it.
    engine.advance_to(end + 31_999);
    assert_eq!(last_text(&engine), "Stream ended.");
    assert!(
        !engine
            .drain_events()
            .iter()
            .any(|event| matches!(event, BattleEvent::TransitionRequested { .. }))
    );

    engine.advance_to(end + 32_000);
    assert_eq!(
        engine.drain_events(),
        vec![BattleEvent::TransitionRequested {
            screen: Screen::Victory1
        }]
    );
    engine.advance_by(100_000);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn self_inflicted_damage_can_lose_the_battle() {
    let mut engine = started(heal_counter_encounter(), 0);
    for _ in 0..20 {
        if engine.session().is_over() {
            break;
        }
        exchange(&mut engine, BattleEngine::flee);
    }

    assert_eq!(engine.session().outcome, Some(BattleOutcome::Defeat));
    assert_eq!(engine.player().current_hp(), 0);
    assert_eq!(last_text(&engine), "Lost.");
    let end = engine.clock();
    engine.drain_events();

    // Comments are still logged but no longer heal.
    assert_eq!(engine.submit_comment("get up!!"), IntentOutcome::Applied);
    assert_eq!(engine.player().current_hp(), 0);

    engine.advance_to(end + 15_000);
    assert!(engine.drain_events().contains(&BattleEvent::SkipAvailable));

    // Final defeat line at +18s, transition 20s later.
    engine.advance_to(end + 38_000);
    assert_eq!(
        engine.drain_events(),
        vec![BattleEvent::TransitionRequested {
            screen: Screen::Result1
        }]
    );
}

#[test]
fn defeat_takes_precedence_when_both_fall() {
    let mut engine = started(heal_counter_encounter(), 0);
    engine.player.take_damage(100);
    engine.opponent.take_damage(100);
    engine.settle();

    assert_eq!(engine.session().outcome, Some(BattleOutcome::Defeat));
    // The phase monitor never sees a finished battle.
    assert_eq!(engine.phase_stage(), PhaseStage::Dormant);

    // The outcome is fixed once set.
    engine.settle();
    let ended = engine
        .drain_events()
        .into_iter()
        .filter(|event| matches!(event, BattleEvent::BattleEnded { .. }))
        .count();
    assert_eq!(ended, 1);
}

#[test]
fn rage_hesitates_activates_mitigates_and_expires() {
    let mut engine = started(rage_encounter(), 0);

    // 100 -> 85 -> 70 -> 55 -> 40 -> 25; the opponent hits for 10 until it
    // drops below 30 percent, then passes.
    for _ in 0..5 {
        exchange(&mut engine, BattleEngine::attack);
    }
    assert_eq!(engine.opponent().current_hp(), 25);
    assert_eq!(engine.player().current_hp(), 60);
    assert_eq!(engine.phase_stage(), PhaseStage::Dormant);

    engine.drain_events();
    engine.attack();
    assert_eq!(engine.opponent().current_hp(), 10);
    assert_eq!(engine.phase_stage(), PhaseStage::Pending);
    assert_eq!(last_text(&engine), "Please fund me!");
    let flags = engine.snapshot().phase_flags;
    assert!(flags.contains(PhaseFlags::RAGE_TRIGGERED));
    assert!(!flags.contains(PhaseFlags::RAGE_ACTIVE));

    engine.advance_by(1_000);
    assert_eq!(engine.opponent().current_hp(), 100);
    assert_eq!(
        engine.phase_stage(),
        PhaseStage::Active {
            remaining_ticks: Some(40)
        }
    );
    assert_eq!(
        engine.drain_events(),
        vec![
            BattleEvent::PhaseChanged {
                phase: PhaseId::Rage,
                active: true
            },
            BattleEvent::MusicChanged(MusicCue::RageTheme),
        ]
    );

    engine.advance_by(500);
    assert_eq!(last_text(&engine), "Yuji hits Toru for 10.");
    assert_eq!(engine.player().current_hp(), 50);
    engine.advance_by(1_500);
    assert!(engine.can_act(Actor::Player));

    // Mitigated basic attack.
    exchange(&mut engine, BattleEngine::attack);
    assert_eq!(engine.opponent().current_hp(), 95);

    // Reduced fixed special.
    assert_eq!(exchange(&mut engine, BattleEngine::special), IntentOutcome::Applied);
    assert_eq!(engine.opponent().current_hp(), 85);
    assert_eq!(engine.player().current_hp(), 30);

    engine.drain_events();
    engine.advance_by(40_000);
    assert_eq!(engine.phase_stage(), PhaseStage::Spent);
    assert_eq!(
        engine.drain_events(),
        vec![
            BattleEvent::PhaseChanged {
                phase: PhaseId::Rage,
                active: false
            },
            BattleEvent::MusicChanged(MusicCue::Battle),
        ]
    );
    assert!(
        engine
            .narration()
            .iter()
            .any(|entry| entry.text == "Yuji's rage has ended.")
    );

    // Back to full rolls.
    engine.attack();
    assert_eq!(engine.opponent().current_hp(), 70);
}

#[test]
fn ticks_count_seconds_while_running() {
    let mut engine = started(heal_counter_encounter(), 0);
    engine.advance_by(5_000);
    assert_eq!(engine.session().elapsed_seconds, 5);
    assert_eq!(engine.snapshot().battle_time(), "00:05");
}

#[test]
fn reset_discards_pending_work_and_restores_initial_state() {
    let mut engine = started(heal_counter_encounter(), 0);
    engine.attack();
    engine.submit_comment("go");

    engine.reset();
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.player.current_hp, 100);
    assert_eq!(snapshot.opponent.current_hp, 100);
    assert_eq!(snapshot.turn_owner, Actor::Player);
    assert_eq!(snapshot.attack_count, 0);
    assert_eq!(snapshot.elapsed_seconds, 0);
    assert_eq!(snapshot.clock_ms, 0);
    assert!(snapshot.narration.is_empty());
    // Only the restarted duration tick is pending.
    assert_eq!(engine.next_due(), Some(1_000));

    // The reply queued before the reset never lands.
    engine.advance_by(5_000);
    assert_eq!(engine.player().current_hp(), 100);
    assert_eq!(engine.session().elapsed_seconds, 5);

    engine.start();
    assert_eq!(engine.narration().len(), 1);
}

#[test]
fn rage_still_expires_after_a_reset() {
    let mut engine = started(rage_encounter(), 0);
    exchange(&mut engine, BattleEngine::attack);
    engine.reset();

    for _ in 0..5 {
        exchange(&mut engine, BattleEngine::attack);
    }
    engine.attack();
    assert_eq!(engine.phase_stage(), PhaseStage::Pending);

    engine.advance_by(1_000);
    assert_eq!(
        engine.phase_stage(),
        PhaseStage::Active {
            remaining_ticks: Some(40)
        }
    );

    engine.advance_by(41_000);
    assert_eq!(engine.phase_stage(), PhaseStage::Spent);
    assert!(!engine.snapshot().phase_flags.contains(PhaseFlags::RAGE_ACTIVE));
}

#[test]
fn teardown_cancels_everything_atomically() {
    let mut engine = started(heal_counter_encounter(), 0);
    engine.attack();

    // Duration tick plus the opponent's reply.
    assert_eq!(engine.teardown(), 2);
    assert_eq!(engine.next_due(), None);

    engine.advance_by(10_000);
    assert_eq!(engine.session().elapsed_seconds, 0);
    assert_eq!(engine.player().current_hp(), 100);
}

#[test]
fn same_seed_replays_identically() {
    let run = || {
        let mut engine = BattleEngine::new(rage_encounter(), 42);
        engine.start();
        for _ in 0..4 {
            exchange(&mut engine, BattleEngine::attack);
        }
        exchange(&mut engine, BattleEngine::use_item);
        exchange(&mut engine, BattleEngine::attack);
        engine.snapshot()
    };
    assert_eq!(run(), run());
}

#[test]
fn fixtures_validate_and_bad_content_is_rejected() {
    assert_eq!(heal_counter_encounter().validate(), Ok(()));
    assert_eq!(rage_encounter().validate(), Ok(()));

    let mut inverted = heal_counter_encounter();
    inverted.opponent.attack = DamageRange { min: 20, max: 10 };
    assert!(matches!(
        inverted.validate(),
        Err(EncounterError::InvertedAttack { min: 20, max: 10, .. })
    ));

    let mut empty = rage_encounter();
    empty.narration.attack_speech.clear();
    assert_eq!(
        empty.validate(),
        Err(EncounterError::EmptyPool {
            pool: "attack_speech"
        })
    );

    let mut unreachable = heal_counter_encounter();
    if let PhaseScript::HealCounter(script) = &mut unreachable.phase {
        script.threshold_hp = 100;
    }
    assert!(matches!(
        unreachable.validate(),
        Err(EncounterError::ThresholdTooHigh { .. })
    ));
}
