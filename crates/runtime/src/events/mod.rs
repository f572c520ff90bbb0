//! Topic-based event bus for runtime events.
//!
//! Battle cues and narration lines are published to separate topics so a
//! renderer can follow the log without filtering lifecycle traffic.

mod bus;

pub use bus::{Event, EventBus, Topic};
