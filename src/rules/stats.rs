//! Energy, score, and the game-over latch.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::GameConfig;
use crate::core::event::{EventLog, GameEvent};
use crate::projects::RewardCredit;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
}

/// Energy and completed-project count.
///
/// Once a terminal condition is seen the latch closes and stays closed for
/// the rest of the game, whatever later rewards do to the counters. The
/// outcome itself is settled later, once every animation has drained.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    energy: i64,
    completed_amount: i64,
    win_threshold: i64,
    latched: bool,
    outcome: Option<Outcome>,
}

impl Stats {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            energy: config.starting_energy,
            completed_amount: 0,
            win_threshold: config.win_threshold,
            latched: false,
            outcome: None,
        }
    }

    #[must_use]
    pub fn energy(&self) -> i64 {
        self.energy
    }

    #[must_use]
    pub fn completed_amount(&self) -> i64 {
        self.completed_amount
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.completed_amount >= self.win_threshold
    }

    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.energy <= 0
    }

    /// The gate is closed for good.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.latched
    }

    /// Settled outcome, once the game is over and drained.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Pay for an assign or discard.
    pub fn charge(&mut self, cost: i64, events: &mut EventLog) {
        self.energy = (self.energy - cost).max(0);
        events.push(GameEvent::EnergyCharged {
            cost,
            remaining: self.energy,
        });
    }

    /// Apply a landed completion reward.
    pub fn credit(&mut self, credit: RewardCredit, events: &mut EventLog) {
        self.energy += credit.energy;
        self.completed_amount += credit.completed;
        events.push(GameEvent::RewardCredited {
            energy: self.energy,
            completed_amount: self.completed_amount,
        });
    }

    /// Close the latch if a terminal condition holds. Returns `true` on the
    /// call that closes it.
    pub fn latch(&mut self) -> bool {
        if self.latched || !(self.is_won() || self.is_lost()) {
            return false;
        }
        self.latched = true;
        info!(
            energy = self.energy,
            completed = self.completed_amount,
            "game over latched"
        );
        true
    }

    /// Settle the outcome of a latched game. Idempotent.
    ///
    /// The outcome is read at settle time, not latch time: a reward that
    /// lands after an energy loss latched and reaches the threshold wins.
    pub fn settle(&mut self, events: &mut EventLog) -> Option<Outcome> {
        if !self.latched {
            return None;
        }
        if self.outcome.is_none() {
            let outcome = if self.is_won() { Outcome::Win } else { Outcome::Loss };
            info!(?outcome, "game over");
            events.push(GameEvent::GameOver { outcome });
            self.outcome = Some(outcome);
        }
        self.outcome
    }
}
