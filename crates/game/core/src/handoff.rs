//! Key/value handoff between battle and result screens.

use std::collections::BTreeMap;

use crate::state::BattleOutcome;

/// Formatted duration of the last finished battle.
pub const FINAL_BATTLE_TIME: &str = "finalBattleTime";
/// Present when the last battle was lost.
pub const FROM_DEFEAT: &str = "fromDefeat";

/// Largest duration that still fits the `MM:SS` display.
const MAX_DISPLAY_SECONDS: u32 = 100 * 60;

/// Formats battle seconds as `MM:SS`; anything from 100 minutes on shows `99:99`.
pub fn format_battle_time(seconds: u32) -> String {
    if seconds >= MAX_DISPLAY_SECONDS {
        return "99:99".to_owned();
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Per-run store written when a battle ends and read by the next screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionHandoff {
    values: BTreeMap<String, String>,
}

impl SessionHandoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records a finished battle.
    pub fn record_result(&mut self, outcome: BattleOutcome, elapsed_seconds: u32) {
        self.set(FINAL_BATTLE_TIME, format_battle_time(elapsed_seconds));
        match outcome {
            BattleOutcome::Defeat => self.set(FROM_DEFEAT, "true"),
            BattleOutcome::Victory => {
                self.remove(FROM_DEFEAT);
            }
        }
    }

    pub fn final_battle_time(&self) -> Option<&str> {
        self.get(FINAL_BATTLE_TIME)
    }

    pub fn from_defeat(&self) -> bool {
        self.get(FROM_DEFEAT) == Some("true")
    }
}
