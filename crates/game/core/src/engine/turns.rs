use crate::error::IgnoreReason;
use crate::rng::RngOracle;
use crate::state::Actor;

use super::{BattleEngine, BattleTask};

/// Turn ownership and hand-off.
impl<R: RngOracle> BattleEngine<R> {
    /// True when `actor` holds the turn in a battle that is still running.
    pub fn can_act(&self, actor: Actor) -> bool {
        !self.session.is_over() && self.session.turn_owner == actor
    }

    pub(super) fn check_player_turn(&self) -> Result<(), IgnoreReason> {
        if self.session.is_over() {
            return Err(IgnoreReason::BattleOver);
        }
        if self.session.turn_owner != Actor::Player {
            return Err(IgnoreReason::NotPlayerTurn);
        }
        Ok(())
    }

    /// Flips the turn and queues the opponent's automatic reply.
    pub(super) fn pass_turn_to_opponent(&mut self) {
        self.session.turn_owner = Actor::Opponent;
        let delay = self.encounter.timings.opponent_reply_ms;
        self.scheduler
            .schedule(self.clock, delay, BattleTask::OpponentTurn);
    }

    pub(super) fn take_opponent_turn(&mut self) {
        if !self.can_act(Actor::Opponent) {
            return;
        }
        self.resolve_opponent_action();
        self.settle();
        if self.session.is_over() {
            return;
        }

        let delay = self.encounter.timings.player_return_ms;
        if delay == 0 {
            self.give_turn_to_player();
        } else {
            self.scheduler
                .schedule(self.clock, delay, BattleTask::ReturnTurn);
        }
    }

    pub(super) fn give_turn_to_player(&mut self) {
        if self.session.is_over() {
            return;
        }
        self.session.turn_owner = Actor::Player;
    }
}
