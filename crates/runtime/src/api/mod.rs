//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the worker and event plumbing can stay private.

pub mod errors;
pub mod handle;
pub mod intent;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use intent::PlayerIntent;
