use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::encounter::{DamageRange, Odds, PhaseScript};
use crate::error::IgnoreReason;
use crate::rng::{RngOracle, RollContext};
use crate::state::{Actor, Combatant};

use super::{BattleEngine, PhaseStage};

/// HP change produced by one resolution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HpEffect {
    Damage { target: Actor, amount: u32 },
    Heal { target: Actor, amount: u32 },
    RestoreFull { target: Actor },
}

type Effects = ArrayVec<HpEffect, 2>;

/// Action resolution: damage rolls, narration and HP effects.
impl<R: RngOracle> BattleEngine<R> {
    pub(super) fn resolve_attack(&mut self) -> Result<(), IgnoreReason> {
        self.session.next_nonce();

        if self.session.confused {
            self.session.confused = false;
            let template = self.encounter.narration.confused_attack.clone();
            let applied = self.apply(HpEffect::Damage {
                target: Actor::Player,
                amount: BattleConfig::CONFUSION_SELF_DAMAGE,
            });
            self.report(&template, applied);
            return Ok(());
        }

        self.session.attack_count = self.session.attack_count.saturating_add(1);
        let speech = self.pick_line(Actor::Player, &self.encounter.narration.attack_speech);
        self.speak(Actor::Player, &speech);

        let damage = match self.active_rage() {
            Some((odds, mitigated, _)) => {
                let seed = self.roll_seed(Actor::Player, RollContext::Mitigation);
                if self.rng.chance(seed, odds.numerator, odds.denominator) {
                    mitigated
                } else {
                    self.roll(Actor::Player, self.player.attack())
                }
            }
            None => self.roll(Actor::Player, self.player.attack()),
        };

        let applied = self.apply(HpEffect::Damage {
            target: Actor::Opponent,
            amount: damage,
        });
        let template = self.encounter.narration.attack_report.clone();
        self.report(&template, applied);
        Ok(())
    }

    pub(super) fn resolve_special(&mut self) -> Result<(), IgnoreReason> {
        if !self.session.special_ready() {
            return Err(IgnoreReason::SpecialNotReady);
        }
        self.session.next_nonce();
        self.session.attack_count = 0;

        let speech = self.pick_line(Actor::Player, &self.encounter.narration.special_speech);
        self.speak(Actor::Player, &speech);

        let damage = match self.active_rage() {
            Some((_, _, special_damage)) => special_damage,
            None => self.roll(
                Actor::Player,
                DamageRange {
                    min: self.encounter.special_floor,
                    max: self.player.special_power(),
                },
            ),
        };

        let applied = self.apply(HpEffect::Damage {
            target: Actor::Opponent,
            amount: damage,
        });
        let template = self.encounter.narration.special_report.clone();
        self.report(&template, applied);
        Ok(())
    }

    pub(super) fn resolve_flee(&mut self) -> Result<(), IgnoreReason> {
        self.session.next_nonce();
        let speech = self.encounter.narration.flee_speech.clone();
        self.speak(Actor::Player, &speech);

        let applied = self.apply(HpEffect::Damage {
            target: Actor::Player,
            amount: BattleConfig::FLEE_SELF_DAMAGE,
        });
        let template = self.encounter.narration.flee_report.clone();
        self.report(&template, applied);
        Ok(())
    }

    pub(super) fn resolve_item(&mut self) -> Result<(), IgnoreReason> {
        self.session.next_nonce();
        let speech = self.encounter.narration.item_speech.clone();
        self.speak(Actor::Player, &speech);

        if self.player.is_below_half() {
            let restored = self.apply(HpEffect::RestoreFull {
                target: Actor::Player,
            });
            let template = self.encounter.narration.item_full_heal.clone();
            self.report(&template, restored);
            return Ok(());
        }

        let narration = &self.encounter.narration;
        let seed = self.roll_seed(Actor::Player, RollContext::ItemOutcome);
        let index = self.rng.pick(seed, narration.item_backfires.len());
        let template = narration.item_backfires.get(index).cloned().unwrap_or_default();
        if index == narration.item_confusing_backfire {
            self.session.confused = true;
        }

        let applied = self.apply(HpEffect::Damage {
            target: Actor::Player,
            amount: BattleConfig::ITEM_BACKFIRE_DAMAGE,
        });
        self.report(&template, applied);
        Ok(())
    }

    /// The opponent's automatic action for the current phase.
    pub(super) fn resolve_opponent_action(&mut self) {
        self.session.next_nonce();

        match (&self.encounter.phase, self.phase) {
            (PhaseScript::HealCounter(script), stage) if stage.is_active() => {
                let script = script.clone();
                let speech = self.pick_line(Actor::Opponent, &script.speech);
                self.speak(Actor::Opponent, &speech);

                let mut effects = Effects::new();
                effects.push(HpEffect::Heal {
                    target: Actor::Opponent,
                    amount: script.heal,
                });
                effects.push(HpEffect::Damage {
                    target: Actor::Player,
                    amount: self.roll(Actor::Opponent, script.counter_damage),
                });
                self.opponent.raise_attack(script.attack_increment);

                let [healed, dealt] = self.apply_all(effects);
                self.report(&script.heal_report, healed);
                self.report(&script.report, dealt);
            }
            (PhaseScript::Rage(script), PhaseStage::Dormant)
                if script
                    .hesitate_below_percent
                    .is_some_and(|percent| self.opponent.hp_percent() < percent) =>
            {
                // Cornered but not yet enraged: the opponent passes.
            }
            (phase, stage) => {
                let speech = match phase {
                    PhaseScript::Rage(script) if stage.is_active() => {
                        self.pick_line(Actor::Opponent, &script.speech)
                    }
                    _ => self.pick_line(
                        Actor::Opponent,
                        &self.encounter.narration.opponent_attack_speech,
                    ),
                };
                self.speak(Actor::Opponent, &speech);

                let damage = self.roll(Actor::Opponent, self.opponent.attack());
                let applied = self.apply(HpEffect::Damage {
                    target: Actor::Player,
                    amount: damage,
                });
                let template = self.encounter.narration.opponent_attack_report.clone();
                self.report(&template, applied);
            }
        }
    }

    /// Rage parameters while the opponent's rage is active:
    /// `(mitigation odds, mitigated basic damage, special damage)`.
    fn active_rage(&self) -> Option<(Odds, u32, u32)> {
        match &self.encounter.phase {
            PhaseScript::Rage(script) if self.phase.is_active() => Some((
                script.mitigation,
                script.mitigated_damage,
                script.special_damage,
            )),
            _ => None,
        }
    }

    fn roll(&self, actor: Actor, range: DamageRange) -> u32 {
        let seed = self.roll_seed(actor, RollContext::Damage);
        self.rng.range(seed, range.min, range.max)
    }

    /// Applies one effect and returns the HP actually changed.
    fn apply(&mut self, effect: HpEffect) -> u32 {
        match effect {
            HpEffect::Damage { target, amount } => self.combatant_mut(target).take_damage(amount),
            HpEffect::Heal { target, amount } => self.combatant_mut(target).heal(amount),
            HpEffect::RestoreFull { target } => self.combatant_mut(target).restore_full(),
        }
    }

    fn apply_all(&mut self, effects: Effects) -> [u32; 2] {
        let mut applied = [0; 2];
        for (slot, effect) in applied.iter_mut().zip(effects) {
            *slot = self.apply(effect);
        }
        applied
    }

    fn combatant_mut(&mut self, actor: Actor) -> &mut Combatant {
        match actor {
            Actor::Player => &mut self.player,
            Actor::Opponent => &mut self.opponent,
        }
    }
}
