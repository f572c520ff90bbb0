//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the active battle or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{BattleSnapshot, EncounterId, IntentOutcome, SessionHandoff};

use super::errors::{Result, RuntimeError};
use super::intent::PlayerIntent;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start an encounter, replacing any battle already running.
    ///
    /// The virtual clock restarts at zero and the intro script begins.
    pub async fn start(&self, encounter: EncounterId) -> Result<BattleSnapshot> {
        self.request(|reply| Command::Start { encounter, reply })
            .await
    }

    /// Restore the active battle to its initial state without replaying the intro.
    pub async fn reset(&self) -> Result<BattleSnapshot> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    /// Cancel every pending task of the active battle. Returns how many were dropped.
    pub async fn teardown(&self) -> Result<usize> {
        self.request(|reply| Command::Teardown { reply }).await
    }

    pub async fn submit(&self, intent: PlayerIntent) -> Result<IntentOutcome> {
        self.request(|reply| Command::Intent { intent, reply })
            .await?
    }

    pub async fn attack(&self) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::Attack).await
    }

    pub async fn special(&self) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::Special).await
    }

    pub async fn flee(&self) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::Flee).await
    }

    pub async fn use_item(&self) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::UseItem).await
    }

    /// Post a spectator comment. Heals the player by its length while the battle runs.
    pub async fn submit_comment(&self, text: impl Into<String>) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::Comment(text.into())).await
    }

    pub async fn request_skip(&self) -> Result<IntentOutcome> {
        self.submit(PlayerIntent::Skip).await
    }

    /// Query the active battle, brought up to the current instant.
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await?
    }

    /// Values recorded by finished battles for the screens that follow.
    pub async fn handoff(&self) -> Result<SessionHandoff> {
        self.request(|reply| Command::Handoff { reply }).await
    }

    /// Forget recorded results, as when returning to the title screen.
    pub async fn clear_handoff(&self) -> Result<()> {
        self.request(|reply| Command::ClearHandoff { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Battle` - lifecycle, phase and music cues, ignored intents
    /// - `Topic::Narration` - every line appended to the battle log
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut narration = handle.subscribe(Topic::Narration);
    /// while let Ok(event) = narration.recv().await {
    ///     // Render the line
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
