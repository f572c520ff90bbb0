//! Battle state machine.
//!
//! [`BattleEngine`] owns one battle session: both combatants, the narration
//! log, the opponent's phase machine, the outcome sequencer and the task list
//! that paces everything on a virtual millisecond clock. Intents arrive
//! through the public methods; delayed work runs when the owner advances the
//! clock with [`BattleEngine::advance_to`].
//!
//! Control flow for a player intent:
//! turn check → resolver → outcome check / phase monitor → turn hand-off,
//! with the opponent's reply and every scripted line queued as [`BattleTask`]s.

mod outcome;
mod phase;
mod resolver;
mod schedule;
mod turns;

pub use phase::PhaseStage;
pub use schedule::{Scheduler, TaskHandle};

use crate::config::{BattleConfig, Millis};
use crate::encounter::{EncounterConfig, ScriptedLine, Speaker};
use crate::error::IgnoreReason;
use crate::event::{BattleEvent, MusicCue};
use crate::rng::{PcgRng, RngOracle, RollContext, compute_seed};
use crate::state::{
    Actor, BattleSession, Combatant, LineVars, NarrationEntry, NarrationLog,
};
use crate::view::{BattleSnapshot, CombatantView};

/// Result of submitting an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntentOutcome {
    Applied,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl IntentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Delayed work owned by a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleTask {
    /// One-second duration tick; reschedules itself until the battle ends.
    Tick,
    /// Scripted intro or phase line.
    Line(NarrationEntry),
    OpponentTurn,
    ReturnTurn,
    ActivateRage,
    /// Post-battle narration.
    OutcomeLine(NarrationEntry),
    RevealSkip,
    Transition,
}

impl BattleTask {
    /// Outcome sequencer tasks survive the end of the battle.
    pub fn is_outcome(&self) -> bool {
        matches!(
            self,
            Self::OutcomeLine(_) | Self::RevealSkip | Self::Transition
        )
    }
}

pub struct BattleEngine<R = PcgRng> {
    encounter: EncounterConfig,
    rng: R,
    player: Combatant,
    opponent: Combatant,
    session: BattleSession,
    phase: PhaseStage,
    log: NarrationLog,
    scheduler: Scheduler<BattleTask>,
    clock: Millis,
    events: Vec<BattleEvent>,
}

impl BattleEngine<PcgRng> {
    pub fn new(encounter: EncounterConfig, seed: u64) -> Self {
        Self::with_rng(encounter, seed, PcgRng)
    }
}

impl<R: RngOracle> BattleEngine<R> {
    /// Creates an engine in its initial state. Nothing is scheduled until
    /// [`start`](Self::start) is called.
    pub fn with_rng(encounter: EncounterConfig, seed: u64, rng: R) -> Self {
        let player = Combatant::from_template(&encounter.player);
        let opponent = Combatant::from_template(&encounter.opponent);
        Self {
            encounter,
            rng,
            player,
            opponent,
            session: BattleSession::new(seed),
            phase: PhaseStage::Dormant,
            log: NarrationLog::new(),
            scheduler: Scheduler::new(),
            clock: 0,
            events: Vec::new(),
        }
    }

    pub fn encounter(&self) -> &EncounterConfig {
        &self.encounter
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    pub fn narration(&self) -> &NarrationLog {
        &self.log
    }

    pub fn clock(&self) -> Millis {
        self.clock
    }

    pub fn scheduler(&self) -> &Scheduler<BattleTask> {
        &self.scheduler
    }

    /// Virtual time of the next pending task.
    pub fn next_due(&self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Takes every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Restores the initial state: full HP, empty log, clock at zero. Every
    /// pending task is dropped and the duration tick starts over.
    pub fn reset(&mut self) {
        let seed = self.session.seed;
        self.reset_with_seed(seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        self.scheduler.cancel_all();
        self.player = Combatant::from_template(&self.encounter.player);
        self.opponent = Combatant::from_template(&self.encounter.opponent);
        self.session = BattleSession::new(seed);
        self.phase = PhaseStage::Dormant;
        self.log.clear();
        self.clock = 0;
        self.events.clear();
        self.scheduler
            .schedule(self.clock, BattleConfig::TICK_MS, BattleTask::Tick);
    }

    /// Resets, then announces the battle and plays the intro.
    pub fn start(&mut self) {
        self.reset();
        self.events.push(BattleEvent::BattleStarted {
            encounter: self.encounter.id,
        });
        self.events.push(BattleEvent::MusicChanged(MusicCue::Battle));
        let intro = self.encounter.intro.clone();
        self.play_lines(&intro, false);
    }

    /// Cancels every pending task. Returns how many were dropped.
    pub fn teardown(&mut self) -> usize {
        self.scheduler.cancel_all()
    }

    /// Runs every task due at or before `now`, in order, then moves the clock
    /// to `now`. Returns the number of tasks run.
    pub fn advance_to(&mut self, now: Millis) -> usize {
        let mut ran = 0;
        while let Some((due, task)) = self.scheduler.pop_due(now) {
            self.clock = self.clock.max(due);
            self.run_task(task);
            ran += 1;
        }
        self.clock = self.clock.max(now);
        ran
    }

    pub fn advance_by(&mut self, delta: Millis) -> usize {
        self.advance_to(self.clock.saturating_add(delta))
    }

    pub fn attack(&mut self) -> IntentOutcome {
        self.player_action(Self::resolve_attack)
    }

    pub fn special(&mut self) -> IntentOutcome {
        self.player_action(Self::resolve_special)
    }

    pub fn flee(&mut self) -> IntentOutcome {
        self.player_action(Self::resolve_flee)
    }

    pub fn use_item(&mut self) -> IntentOutcome {
        self.player_action(Self::resolve_item)
    }

    /// Logs a spectator comment and heals the player by its length.
    ///
    /// Comments are accepted at any time, but only heal a wounded player in a
    /// battle that is still running.
    pub fn submit_comment(&mut self, text: &str) -> IntentOutcome {
        let text = text.trim();
        if text.is_empty() {
            return IntentOutcome::Ignored(IgnoreReason::EmptyComment);
        }

        self.log
            .push(NarrationEntry::spoken(self.encounter.audience.clone(), text));

        if !self.session.is_over() && self.player.is_wounded() {
            let heal = BattleConfig::comment_heal(text.chars().count());
            self.player.heal(heal);
            let template = self.encounter.narration.comment_heal_report.clone();
            self.report(&template, heal);
        }
        IntentOutcome::Applied
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            encounter: self.encounter.id,
            clock_ms: self.clock,
            player: CombatantView::from(&self.player),
            opponent: CombatantView::from(&self.opponent),
            turn_owner: self.session.turn_owner,
            is_over: self.session.is_over(),
            outcome: self.session.outcome,
            attack_count: self.session.attack_count,
            special_ready: self.session.special_ready(),
            phase_flags: self.phase_flags(),
            elapsed_seconds: self.session.elapsed_seconds,
            skip_available: self.session.skip_available,
            narration: self.log.entries().to_vec(),
        }
    }

    fn player_action(
        &mut self,
        resolve: fn(&mut Self) -> Result<(), IgnoreReason>,
    ) -> IntentOutcome {
        if let Err(reason) = self.check_player_turn() {
            return IntentOutcome::Ignored(reason);
        }
        if let Err(reason) = resolve(self) {
            return IntentOutcome::Ignored(reason);
        }
        self.settle();
        if !self.session.is_over() {
            self.pass_turn_to_opponent();
        }
        IntentOutcome::Applied
    }

    fn run_task(&mut self, task: BattleTask) {
        match task {
            BattleTask::Tick => self.on_tick(),
            BattleTask::Line(entry) | BattleTask::OutcomeLine(entry) => self.log.push(entry),
            BattleTask::OpponentTurn => self.take_opponent_turn(),
            BattleTask::ReturnTurn => self.give_turn_to_player(),
            BattleTask::ActivateRage => self.activate_rage(),
            BattleTask::RevealSkip => self.reveal_skip(),
            BattleTask::Transition => {
                self.request_transition();
            }
        }
    }

    fn on_tick(&mut self) {
        if self.session.is_over() {
            return;
        }
        self.session.elapsed_seconds = self.session.elapsed_seconds.saturating_add(1);
        self.tick_phase();
        self.scheduler
            .schedule(self.clock, BattleConfig::TICK_MS, BattleTask::Tick);
    }

    /// Appends immediate lines and queues delayed ones.
    fn play_lines(&mut self, lines: &[ScriptedLine], outcome: bool) {
        for line in lines {
            let entry = self.scripted_entry(line);
            if line.delay_ms == 0 {
                self.log.push(entry);
            } else if outcome {
                self.scheduler
                    .schedule(self.clock, line.delay_ms, BattleTask::OutcomeLine(entry));
            } else {
                self.scheduler
                    .schedule(self.clock, line.delay_ms, BattleTask::Line(entry));
            }
        }
    }

    fn scripted_entry(&self, line: &ScriptedLine) -> NarrationEntry {
        let text = self.vars(0).render(&line.text);
        match self.encounter.speaker_name(line.speaker) {
            Some(name) => NarrationEntry::spoken(name, text),
            None => NarrationEntry::system(text),
        }
    }

    fn vars(&self, amount: u32) -> LineVars<'_> {
        LineVars {
            player: self.player.name(),
            opponent: self.opponent.name(),
            audience: &self.encounter.audience,
            amount,
        }
    }

    /// System line rendered from a template.
    fn report(&mut self, template: &str, amount: u32) {
        let text = self.vars(amount).render(template);
        self.log.push(NarrationEntry::system(text));
    }

    /// Line voiced by one of the combatants.
    fn speak(&mut self, actor: Actor, template: &str) {
        let text = self.vars(0).render(template);
        let name = match actor {
            Actor::Player => self.player.name(),
            Actor::Opponent => self.opponent.name(),
        };
        self.log.push(NarrationEntry::spoken(name, text));
    }

    fn roll_seed(&self, actor: Actor, context: RollContext) -> u64 {
        compute_seed(self.session.seed, self.session.nonce, actor, context)
    }

    /// Picks a line from a pool; empty pools yield an empty line.
    fn pick_line(&self, actor: Actor, pool: &[String]) -> String {
        let index = self
            .rng
            .pick(self.roll_seed(actor, RollContext::Line), pool.len());
        pool.get(index).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests;
