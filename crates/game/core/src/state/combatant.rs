use crate::encounter::{CombatantTemplate, DamageRange};

/// One side of the battle.
///
/// `current_hp` is kept within `[0, max_hp]` by every mutator; callers never
/// write it directly.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    name: String,
    max_hp: u32,
    current_hp: u32,
    attack: DamageRange,
    special_power: u32,
}

impl Combatant {
    /// Fresh combatant at full health.
    pub fn from_template(template: &CombatantTemplate) -> Self {
        Self {
            name: template.name.clone(),
            max_hp: template.max_hp,
            current_hp: template.max_hp,
            attack: template.attack,
            special_power: template.special_power,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Basic attack damage range; may grow during a battle.
    pub fn attack(&self) -> DamageRange {
        self.attack
    }

    pub fn special_power(&self) -> u32 {
        self.special_power
    }

    pub fn is_defeated(&self) -> bool {
        self.current_hp == 0
    }

    /// Strictly below half of max HP.
    pub fn is_below_half(&self) -> bool {
        self.current_hp.saturating_mul(2) < self.max_hp
    }

    pub fn is_wounded(&self) -> bool {
        self.current_hp < self.max_hp
    }

    /// HP as a percentage of max, rounded down.
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        ((self.current_hp as u64 * 100) / self.max_hp as u64) as u32
    }

    /// Applies damage, floored at zero. Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.current_hp);
        self.current_hp -= applied;
        applied
    }

    /// Restores HP, capped at max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max_hp - self.current_hp);
        self.current_hp += applied;
        applied
    }

    pub fn restore_full(&mut self) -> u32 {
        self.heal(self.max_hp)
    }

    /// Raises both ends of the attack range.
    pub fn raise_attack(&mut self, increment: u32) {
        self.attack = DamageRange {
            min: self.attack.min.saturating_add(increment),
            max: self.attack.max.saturating_add(increment),
        };
    }
}
