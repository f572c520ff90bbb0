//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the active battle and turns wall time into
//! engine ticks.

mod session;

pub use session::{Command, SessionWorker};
