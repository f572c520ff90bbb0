use core::slice;

/// Speaker name recorded on system-voiced entries.
pub const SYSTEM_SPEAKER: &str = "system";

/// One line of battle narration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrationEntry {
    pub speaker: String,
    pub text: String,
    pub is_system: bool,
}

impl NarrationEntry {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: SYSTEM_SPEAKER.to_owned(),
            text: text.into(),
            is_system: true,
        }
    }

    pub fn spoken(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            is_system: false,
        }
    }
}

/// Append-only narration for the current run. Only a reset clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NarrationLog {
    entries: Vec<NarrationEntry>,
}

impl NarrationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: NarrationEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NarrationEntry] {
        &self.entries
    }

    /// Entries appended after the first `start` entries.
    pub fn since(&self, start: usize) -> &[NarrationEntry] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&NarrationEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, NarrationEntry> {
        self.entries.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Substitutions available to narration templates.
///
/// Templates reference `{player}`, `{opponent}`, `{audience}` and `{amount}`.
#[derive(Clone, Copy, Debug)]
pub struct LineVars<'a> {
    pub player: &'a str,
    pub opponent: &'a str,
    pub audience: &'a str,
    pub amount: u32,
}

impl LineVars<'_> {
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{player}", self.player)
            .replace("{opponent}", self.opponent)
            .replace("{audience}", self.audience)
            .replace("{amount}", &self.amount.to_string())
    }
}
