//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive battles.

use std::env;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_content::EncounterSet;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::workers::SessionWorker;

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Fixed battle seed. `None` draws a fresh seed for every battle.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 128,
            command_buffer_size: 32,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RUNTIME_EVENT_BUFFER` - Per-topic event capacity (default: 128)
    /// - `RUNTIME_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `BATTLE_SEED` - Fixed seed for reproducible battles (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("RUNTIME_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("RUNTIME_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        config.seed = read_env::<u64>("BATTLE_SEED");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts one live battle session
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every handle has been dropped, cancelling any
    /// pending battle tasks on the way out.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    encounters: Option<EncounterSet>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            encounters: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Fix the seed used for every battle.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Provide encounter content. Defaults to the built-in set.
    pub fn encounters(mut self, encounters: EncounterSet) -> Self {
        self.encounters = Some(encounters);
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let encounters = match self.encounters {
            Some(encounters) => encounters,
            None => EncounterSet::builtin()?,
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SessionWorker::new(encounters, self.config.seed, command_rx, event_bus.clone());
        let worker_handle = tokio::spawn(worker.run());

        let handle = RuntimeHandle::new(command_tx, event_bus);

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
