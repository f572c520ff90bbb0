use serde::{Deserialize, Serialize};

/// Something the player (or the audience) asks the battle to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    Attack,
    Special,
    Flee,
    UseItem,
    Comment(String),
    /// Skip the rest of the post-battle script.
    Skip,
}

impl PlayerIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "attack",
            Self::Special => "special",
            Self::Flee => "flee",
            Self::UseItem => "use_item",
            Self::Comment(_) => "comment",
            Self::Skip => "skip",
        }
    }
}
