use crate::error::IgnoreReason;
use crate::event::{BattleEvent, MusicCue};
use crate::rng::RngOracle;
use crate::state::BattleOutcome;

use super::{BattleEngine, BattleTask, IntentOutcome};

/// Outcome sequencer.
impl<R: RngOracle> BattleEngine<R> {
    /// Post-mutation check. Player defeat takes precedence when both sides
    /// reach zero; otherwise the phase monitor gets a look.
    pub(super) fn settle(&mut self) {
        if self.session.is_over() {
            return;
        }
        if self.player.is_defeated() {
            self.end_battle(BattleOutcome::Defeat);
        } else if self.opponent.is_defeated() {
            self.end_battle(BattleOutcome::Victory);
        } else {
            self.evaluate_phase();
        }
    }

    /// Fixes the outcome and starts the post-battle script. Runs once per session.
    fn end_battle(&mut self, outcome: BattleOutcome) {
        if self.session.is_over() {
            return;
        }
        self.session.outcome = Some(outcome);
        self.scheduler.cancel_where(|task| !task.is_outcome());

        self.events.push(BattleEvent::BattleEnded {
            outcome,
            elapsed_seconds: self.session.elapsed_seconds,
        });
        self.events.push(BattleEvent::MusicChanged(match outcome {
            BattleOutcome::Victory => MusicCue::Victory,
            BattleOutcome::Defeat => MusicCue::Defeat,
        }));

        let script = self.encounter.outcome_script(outcome).clone();
        self.play_lines(&script.lines, true);
        self.scheduler
            .schedule(self.clock, script.skip_after_ms, BattleTask::RevealSkip);
        self.scheduler.schedule(
            self.clock,
            script.transition_due_ms(),
            BattleTask::Transition,
        );
    }

    pub(super) fn reveal_skip(&mut self) {
        if !self.session.is_over() || self.session.skip_available || self.session.transition_requested
        {
            return;
        }
        self.session.skip_available = true;
        self.events.push(BattleEvent::SkipAvailable);
    }

    /// Requests the post-battle scene change. Returns false if it already happened.
    pub(super) fn request_transition(&mut self) -> bool {
        let Some(outcome) = self.session.outcome else {
            return false;
        };
        if self.session.transition_requested {
            return false;
        }
        self.session.transition_requested = true;
        self.scheduler.cancel_where(BattleTask::is_outcome);

        let screen = self.encounter.outcome_script(outcome).next_screen;
        self.events
            .push(BattleEvent::TransitionRequested { screen });
        true
    }

    /// Skips the rest of the outcome script once the skip affordance is shown.
    pub fn request_skip(&mut self) -> IntentOutcome {
        if !self.session.skip_available || self.session.transition_requested {
            return IntentOutcome::Ignored(IgnoreReason::SkipUnavailable);
        }
        self.request_transition();
        IntentOutcome::Applied
    }
}
