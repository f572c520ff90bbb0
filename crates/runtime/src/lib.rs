//! Runtime orchestration for live battle sessions.
//!
//! This crate puts a [`game_core::BattleEngine`] behind a background worker
//! that maps wall time onto the engine's virtual clock. Consumers embed
//! [`Runtime`] to start encounters, forward player intents, and subscribe to
//! battle and narration events through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{PlayerIntent, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
