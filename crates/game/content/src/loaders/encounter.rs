//! Encounter definition loader.

use std::path::Path;

use game_core::EncounterConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounter definitions written in RON.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load and validate an encounter from a RON file.
    pub fn load(path: &Path) -> LoadResult<EncounterConfig> {
        let content = read_file(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse and validate an encounter from RON source.
    ///
    /// `origin` names the source in error messages.
    pub fn parse(source: &str, origin: &str) -> LoadResult<EncounterConfig> {
        let encounter: EncounterConfig = ron::from_str(source)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON {}: {}", origin, e))?;

        encounter
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid encounter {}: {}", origin, e))?;

        Ok(encounter)
    }
}
