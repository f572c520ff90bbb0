//! The built-in encounters.

use game_core::{EncounterConfig, EncounterId};

use crate::loaders::{EncounterLoader, LoadResult};

const FIRST: &str = include_str!("../data/encounters/first.ron");
const SECOND: &str = include_str!("../data/encounters/second.ron");

/// Both encounters, parsed and validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterSet {
    first: EncounterConfig,
    second: EncounterConfig,
}

impl EncounterSet {
    /// Parses the encounters embedded in the crate.
    pub fn builtin() -> LoadResult<Self> {
        Self::from_parts(
            EncounterLoader::parse(FIRST, "first.ron")?,
            EncounterLoader::parse(SECOND, "second.ron")?,
        )
    }

    /// Builds a set from already-parsed encounters, checking each sits in its slot.
    pub fn from_parts(first: EncounterConfig, second: EncounterConfig) -> LoadResult<Self> {
        for (expected, encounter) in [(EncounterId::First, &first), (EncounterId::Second, &second)]
        {
            if encounter.id != expected {
                anyhow::bail!(
                    "encounter slot {} holds encounter {}",
                    expected,
                    encounter.id
                );
            }
        }
        Ok(Self { first, second })
    }

    pub fn get(&self, id: EncounterId) -> &EncounterConfig {
        match id {
            EncounterId::First => &self.first,
            EncounterId::Second => &self.second,
        }
    }
}
