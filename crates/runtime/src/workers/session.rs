//! Session worker that owns the active [`BattleEngine`].
//!
//! Receives commands from [`crate::RuntimeHandle`], maps elapsed wall time
//! onto the engine's virtual clock, and publishes battle cues and narration
//! to the [`EventBus`]. The clock reads zero when a battle starts; between
//! commands the worker sleeps until the next scheduled task is due.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use game_content::EncounterSet;
use game_core::{
    BattleEngine, BattleEvent, BattleSnapshot, EncounterId, IntentOutcome, Millis, SessionHandoff,
};

use crate::api::{PlayerIntent, Result, RuntimeError};
use crate::events::{Event, EventBus};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Start an encounter from its intro, replacing the active battle.
    Start {
        encounter: EncounterId,
        reply: oneshot::Sender<BattleSnapshot>,
    },
    /// Restore the active battle to its initial state.
    Reset {
        reply: oneshot::Sender<Result<BattleSnapshot>>,
    },
    /// Cancel the active battle's pending tasks.
    Teardown { reply: oneshot::Sender<usize> },
    /// Forward a player or audience intent to the active battle.
    Intent {
        intent: PlayerIntent,
        reply: oneshot::Sender<Result<IntentOutcome>>,
    },
    /// Query the active battle (read-only).
    Snapshot {
        reply: oneshot::Sender<Result<BattleSnapshot>>,
    },
    Handoff {
        reply: oneshot::Sender<SessionHandoff>,
    },
    ClearHandoff { reply: oneshot::Sender<()> },
}

/// A running battle pinned to the wall-clock instant its virtual clock started.
struct ActiveBattle {
    engine: BattleEngine,
    epoch: Instant,
    /// Narration entries already sent to subscribers.
    published: usize,
}

impl ActiveBattle {
    fn new(engine: BattleEngine) -> Self {
        Self {
            engine,
            epoch: Instant::now(),
            published: 0,
        }
    }

    fn restart_clock(&mut self) {
        self.epoch = Instant::now();
        self.published = 0;
    }

    fn virtual_now(&self) -> Millis {
        let elapsed = Instant::now().saturating_duration_since(self.epoch);
        Millis::try_from(elapsed.as_millis()).unwrap_or(Millis::MAX)
    }

    fn deadline(&self) -> Option<Instant> {
        self.engine
            .next_due()
            .map(|due| self.epoch + Duration::from_millis(due))
    }

    fn catch_up(&mut self) -> usize {
        let now = self.virtual_now();
        self.engine.advance_to(now)
    }
}

/// Background task that processes battle commands.
pub struct SessionWorker {
    encounters: EncounterSet,
    seed: Option<u64>,
    battle: Option<ActiveBattle>,
    handoff: SessionHandoff,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SessionWorker {
    /// Creates a new session worker.
    pub fn new(
        encounters: EncounterSet,
        seed: Option<u64>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            encounters,
            seed,
            battle: None,
            handoff: SessionHandoff::new(),
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self.battle.as_ref().and_then(ActiveBattle::deadline);
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = wait_until(deadline) => self.tick(),
            }
        }

        if let Some(battle) = self.battle.as_mut() {
            let dropped = battle.engine.teardown();
            debug!(target: "runtime::session", dropped, "session worker stopped");
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start { encounter, reply } => {
                let snapshot = self.start(encounter);
                let _ = reply.send(snapshot);
            }
            Command::Reset { reply } => {
                let _ = reply.send(self.reset());
            }
            Command::Teardown { reply } => {
                let dropped = self
                    .battle
                    .as_mut()
                    .map_or(0, |battle| battle.engine.teardown());
                debug!(target: "runtime::session", dropped, "battle torn down");
                let _ = reply.send(dropped);
            }
            Command::Intent { intent, reply } => {
                let _ = reply.send(self.apply_intent(intent));
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Handoff { reply } => {
                let _ = reply.send(self.handoff.clone());
            }
            Command::ClearHandoff { reply } => {
                self.handoff.clear();
                let _ = reply.send(());
            }
        }
    }

    fn start(&mut self, encounter: EncounterId) -> BattleSnapshot {
        if let Some(previous) = self.battle.as_mut() {
            previous.engine.teardown();
        }

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut engine = BattleEngine::new(self.encounters.get(encounter).clone(), seed);
        engine.start();
        info!(target: "runtime::session", %encounter, seed, "battle started");

        let snapshot = engine.snapshot();
        self.battle = Some(ActiveBattle::new(engine));
        self.flush();
        snapshot
    }

    fn reset(&mut self) -> Result<BattleSnapshot> {
        let battle = self.battle.as_mut().ok_or(RuntimeError::NoActiveBattle)?;
        battle.engine.reset();
        battle.restart_clock();
        debug!(
            target: "runtime::session",
            encounter = %battle.engine.encounter().id,
            "battle reset"
        );
        Ok(battle.engine.snapshot())
    }

    fn apply_intent(&mut self, intent: PlayerIntent) -> Result<IntentOutcome> {
        let battle = self.battle.as_mut().ok_or(RuntimeError::NoActiveBattle)?;
        battle.catch_up();

        let engine = &mut battle.engine;
        let clock_ms = engine.clock();
        let outcome = match &intent {
            PlayerIntent::Attack => engine.attack(),
            PlayerIntent::Special => engine.special(),
            PlayerIntent::Flee => engine.flee(),
            PlayerIntent::UseItem => engine.use_item(),
            PlayerIntent::Comment(text) => engine.submit_comment(text),
            PlayerIntent::Skip => engine.request_skip(),
        };

        match outcome {
            IntentOutcome::Applied => {
                debug!(
                    target: "runtime::session",
                    intent = intent.as_str(),
                    clock_ms,
                    "intent applied"
                );
            }
            IntentOutcome::Ignored(reason) => {
                debug!(
                    target: "runtime::session",
                    intent = intent.as_str(),
                    clock_ms,
                    reason = %reason,
                    severity = reason.severity().as_str(),
                    "intent ignored"
                );
                self.event_bus
                    .publish(Event::IntentIgnored { intent, reason });
            }
        }

        self.flush();
        Ok(outcome)
    }

    fn snapshot(&mut self) -> Result<BattleSnapshot> {
        self.tick();
        self.battle
            .as_ref()
            .map(|battle| battle.engine.snapshot())
            .ok_or(RuntimeError::NoActiveBattle)
    }

    /// Runs every task that has come due and publishes the results.
    fn tick(&mut self) {
        if let Some(battle) = self.battle.as_mut() {
            battle.catch_up();
        }
        self.flush();
    }

    /// Publishes narration appended and events emitted since the last flush.
    fn flush(&mut self) {
        let Some(battle) = self.battle.as_mut() else {
            return;
        };

        for entry in battle.engine.narration().since(battle.published) {
            self.event_bus.publish(Event::Narration(entry.clone()));
        }
        battle.published = battle.engine.narration().len();

        let clock_ms = battle.engine.clock();
        for event in battle.engine.drain_events() {
            match &event {
                BattleEvent::BattleEnded {
                    outcome,
                    elapsed_seconds,
                } => {
                    self.handoff.record_result(*outcome, *elapsed_seconds);
                    info!(
                        target: "runtime::session",
                        %outcome,
                        elapsed_seconds,
                        clock_ms,
                        "battle ended"
                    );
                }
                BattleEvent::TransitionRequested { screen } => {
                    info!(target: "runtime::session", %screen, clock_ms, "transition requested");
                }
                other => {
                    debug!(
                        target: "runtime::session",
                        event = other.as_str(),
                        clock_ms,
                        "battle event"
                    );
                }
            }
            self.event_bus.publish(Event::Battle(event));
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
