//! Scene identifiers shared with the surrounding application.

/// Every screen the game can navigate to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Screen {
    Index,
    Start,
    Battle1,
    Victory1,
    Result1,
    Select,
    Battle2,
    Victory2,
    Result2,
    EndingA,
    EndingB,
    EndingC,
}

impl Screen {
    /// Encounter played on this screen, if it is a battle screen.
    pub fn encounter(self) -> Option<EncounterId> {
        match self {
            Self::Battle1 => Some(EncounterId::First),
            Self::Battle2 => Some(EncounterId::Second),
            _ => None,
        }
    }

    pub fn is_ending(self) -> bool {
        matches!(self, Self::EndingA | Self::EndingB | Self::EndingC)
    }
}

/// The two authored battles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterId {
    First,
    Second,
}

impl EncounterId {
    pub fn battle_screen(self) -> Screen {
        match self {
            Self::First => Screen::Battle1,
            Self::Second => Screen::Battle2,
        }
    }
}
