use crate::encounter::PhaseScript;
use crate::event::{BattleEvent, MusicCue, PhaseId};
use crate::rng::RngOracle;
use crate::state::PhaseFlags;

use super::{BattleEngine, BattleTask};

/// Lifecycle of the opponent's special phase.
///
/// Each battle moves through these stages at most once, in order; a reset
/// returns to `Dormant`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseStage {
    #[default]
    Dormant,
    /// Triggered and announced; waiting for activation.
    Pending,
    /// In effect. `None` lasts for the rest of the battle.
    Active { remaining_ticks: Option<u32> },
    /// Ran its course; cannot trigger again.
    Spent,
}

impl PhaseStage {
    /// Moves `Dormant` to `Pending`. Returns false if the phase already fired.
    pub fn try_trigger(&mut self) -> bool {
        if *self != Self::Dormant {
            return false;
        }
        *self = Self::Pending;
        true
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn has_triggered(&self) -> bool {
        *self != Self::Dormant
    }
}

/// Phase trigger monitor.
impl<R: RngOracle> BattleEngine<R> {
    pub fn phase_stage(&self) -> PhaseStage {
        self.phase
    }

    /// Checks the opponent's HP against the phase threshold. Fires at most once.
    pub(super) fn evaluate_phase(&mut self) {
        if self.session.is_over() {
            return;
        }

        match &self.encounter.phase {
            PhaseScript::None => {}
            PhaseScript::HealCounter(script) => {
                if self.opponent.current_hp() > script.threshold_hp || !self.phase.try_trigger() {
                    return;
                }
                let announcement = script.announcement.clone();
                self.phase = PhaseStage::Active {
                    remaining_ticks: None,
                };
                self.events.push(BattleEvent::PhaseChanged {
                    phase: PhaseId::HealCounter,
                    active: true,
                });
                self.events
                    .push(BattleEvent::MusicChanged(MusicCue::HealCounterTheme));
                self.play_lines(&announcement, false);
            }
            PhaseScript::Rage(script) => {
                if self.opponent.current_hp() > script.threshold_hp || !self.phase.try_trigger() {
                    return;
                }
                let announcement = script.announcement.clone();
                let delay = script.activation_delay_ms;
                self.play_lines(&announcement, false);
                self.scheduler
                    .schedule(self.clock, delay, BattleTask::ActivateRage);
            }
        }
    }

    /// Second step of the rage phase: full restore and start of the countdown.
    pub(super) fn activate_rage(&mut self) {
        if self.session.is_over() || self.phase != PhaseStage::Pending {
            return;
        }
        let PhaseScript::Rage(script) = &self.encounter.phase else {
            return;
        };
        self.phase = PhaseStage::Active {
            remaining_ticks: Some(script.duration_ticks),
        };
        self.opponent.restore_full();
        self.events.push(BattleEvent::PhaseChanged {
            phase: PhaseId::Rage,
            active: true,
        });
        self.events
            .push(BattleEvent::MusicChanged(MusicCue::RageTheme));
    }

    /// Counts down a timed phase on each duration tick.
    pub(super) fn tick_phase(&mut self) {
        let PhaseStage::Active {
            remaining_ticks: Some(remaining),
        } = self.phase
        else {
            return;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.phase = PhaseStage::Active {
                remaining_ticks: Some(remaining),
            };
            return;
        }

        self.phase = PhaseStage::Spent;
        if let PhaseScript::Rage(script) = &self.encounter.phase {
            let expiry = script.expiry.clone();
            self.report(&expiry, 0);
        }
        self.events.push(BattleEvent::PhaseChanged {
            phase: PhaseId::Rage,
            active: false,
        });
        self.events.push(BattleEvent::MusicChanged(MusicCue::Battle));
    }

    /// Projection of the phase machine and player status for observers.
    pub(super) fn phase_flags(&self) -> PhaseFlags {
        let mut flags = PhaseFlags::empty();
        match &self.encounter.phase {
            PhaseScript::HealCounter(_) if self.phase.is_active() => {
                flags |= PhaseFlags::HEAL_COUNTER;
            }
            PhaseScript::Rage(_) => {
                flags.set(PhaseFlags::RAGE_TRIGGERED, self.phase.has_triggered());
                flags.set(PhaseFlags::RAGE_ACTIVE, self.phase.is_active());
            }
            _ => {}
        }
        flags.set(PhaseFlags::CONFUSED, self.session.confused);
        flags
    }
}
