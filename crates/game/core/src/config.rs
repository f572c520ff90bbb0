/// Virtual-clock timestamps and delays, in milliseconds since battle start.
pub type Millis = u64;

/// Battle-wide rule constants shared by every encounter.
///
/// Per-encounter numbers (stat tables, thresholds, pacing) live in
/// [`crate::encounter::EncounterConfig`]; only the rules that never vary
/// between encounters are fixed here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BattleConfig;

impl BattleConfig {
    /// Interval of the real-time duration tick.
    pub const TICK_MS: Millis = 1_000;

    /// Consecutive basic attacks needed before the special move unlocks.
    pub const SPECIAL_CHARGE: u32 = 3;

    /// Self-inflicted damage for fleeing.
    pub const FLEE_SELF_DAMAGE: u32 = 10;
    /// Self-inflicted damage when the drink backfires.
    pub const ITEM_BACKFIRE_DAMAGE: u32 = 10;
    /// Self-inflicted damage when attacking while confused.
    pub const CONFUSION_SELF_DAMAGE: u32 = 10;

    /// Characters per healed HP for spectator comments.
    pub const COMMENT_CHARS_PER_HP: usize = 5;
    pub const COMMENT_HEAL_MIN: u32 = 1;
    pub const COMMENT_HEAL_MAX: u32 = 15;

    /// Heal granted by a spectator comment of `len` characters.
    ///
    /// Zero-length comments never reach this (they are ignored upstream), but
    /// the floor of one HP still applies to any non-empty text.
    pub fn comment_heal(len: usize) -> u32 {
        let raw = (len / Self::COMMENT_CHARS_PER_HP).min(u32::MAX as usize) as u32;
        raw.clamp(Self::COMMENT_HEAL_MIN, Self::COMMENT_HEAL_MAX)
    }
}
