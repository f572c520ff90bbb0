//! Authored battle content.
//!
//! The two encounters (stat tables, narration pools, phase scripts and
//! outcome scripts) are written as RON under `data/encounters/` and embedded
//! into the crate at build time. Loaders parse them straight into
//! `game-core` types and validate them before handing them out.

#[cfg(feature = "loaders")]
pub mod encounters;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use encounters::EncounterSet;
#[cfg(feature = "loaders")]
pub use loaders::{EncounterLoader, LoadResult};
