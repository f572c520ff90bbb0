use super::{
    ActionNarration, CombatantTemplate, EncounterConfig, OutcomeScript, PhaseScript,
};

/// Authored encounter data that the engine cannot run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("{who} has zero max HP")]
    ZeroMaxHp { who: String },

    #[error("{who} attack range is inverted ({min} > {max})")]
    InvertedAttack { who: String, min: u32, max: u32 },

    #[error("special floor {floor} exceeds special power {power}")]
    InvertedSpecial { floor: u32, power: u32 },

    #[error("narration pool `{pool}` is empty")]
    EmptyPool { pool: &'static str },

    #[error("confusing backfire index {index} is out of range for {len} outcomes")]
    BackfireIndex { index: usize, len: usize },

    #[error("phase threshold {threshold} is not below opponent max HP {max_hp}")]
    ThresholdTooHigh { threshold: u32, max_hp: u32 },

    #[error("rage duration must be at least one tick")]
    ZeroRageDuration,

    #[error("mitigation odds {numerator}/{denominator} are invalid")]
    InvalidOdds { numerator: u32, denominator: u32 },

    #[error("{outcome} outcome script reveals skip after its transition")]
    SkipAfterTransition { outcome: &'static str },
}

impl EncounterConfig {
    /// Checks the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), EncounterError> {
        validate_combatant(&self.player)?;
        validate_combatant(&self.opponent)?;

        if self.special_floor > self.player.special_power {
            return Err(EncounterError::InvertedSpecial {
                floor: self.special_floor,
                power: self.player.special_power,
            });
        }

        validate_narration(&self.narration)?;

        let max_hp = self.opponent.max_hp;
        match &self.phase {
            PhaseScript::None => {}
            PhaseScript::HealCounter(script) => {
                check_threshold(script.threshold_hp, max_hp)?;
                non_empty(&script.speech, "heal_counter.speech")?;
                if script.counter_damage.min > script.counter_damage.max {
                    return Err(EncounterError::InvertedAttack {
                        who: "heal counter".into(),
                        min: script.counter_damage.min,
                        max: script.counter_damage.max,
                    });
                }
            }
            PhaseScript::Rage(script) => {
                check_threshold(script.threshold_hp, max_hp)?;
                non_empty(&script.speech, "rage.speech")?;
                if script.duration_ticks == 0 {
                    return Err(EncounterError::ZeroRageDuration);
                }
                let odds = script.mitigation;
                if odds.denominator == 0 || odds.numerator > odds.denominator {
                    return Err(EncounterError::InvalidOdds {
                        numerator: odds.numerator,
                        denominator: odds.denominator,
                    });
                }
            }
        }

        validate_outcome(&self.victory, "victory")?;
        validate_outcome(&self.defeat, "defeat")
    }
}

fn validate_combatant(template: &CombatantTemplate) -> Result<(), EncounterError> {
    if template.max_hp == 0 {
        return Err(EncounterError::ZeroMaxHp {
            who: template.name.clone(),
        });
    }
    if template.attack.min > template.attack.max {
        return Err(EncounterError::InvertedAttack {
            who: template.name.clone(),
            min: template.attack.min,
            max: template.attack.max,
        });
    }
    Ok(())
}

fn validate_narration(narration: &ActionNarration) -> Result<(), EncounterError> {
    non_empty(&narration.attack_speech, "attack_speech")?;
    non_empty(&narration.special_speech, "special_speech")?;
    non_empty(&narration.opponent_attack_speech, "opponent_attack_speech")?;
    non_empty(&narration.item_backfires, "item_backfires")?;
    if narration.item_confusing_backfire >= narration.item_backfires.len() {
        return Err(EncounterError::BackfireIndex {
            index: narration.item_confusing_backfire,
            len: narration.item_backfires.len(),
        });
    }
    Ok(())
}

fn validate_outcome(script: &OutcomeScript, outcome: &'static str) -> Result<(), EncounterError> {
    if script.skip_after_ms > script.transition_due_ms() {
        return Err(EncounterError::SkipAfterTransition { outcome });
    }
    Ok(())
}

fn non_empty(pool: &[String], name: &'static str) -> Result<(), EncounterError> {
    if pool.is_empty() {
        Err(EncounterError::EmptyPool { pool: name })
    } else {
        Ok(())
    }
}

fn check_threshold(threshold: u32, max_hp: u32) -> Result<(), EncounterError> {
    if threshold >= max_hp {
        Err(EncounterError::ThresholdTooHigh { threshold, max_hp })
    } else {
        Ok(())
    }
}
