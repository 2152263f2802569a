//! One player's seat at the table.
//!
//! [`Table`] owns a [`GameEngine`] and a [`Ledger`] and sequences them the way the
//! player's commands require: fund and confirm the bank, wager, start the round, roll
//! until it resolves, then play again or walk away. Every command either succeeds or
//! leaves both components untouched.

use crate::dice::{DiceRng, RollSource};
use crate::engine::GameEngine;
use crate::ledger::Ledger;
use crate::observer::Observer;
use craps_types::{BetIncrement, Event, IllegalOperation, Roll, TableError};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

#[cfg(test)]
mod integration_tests;

/// Outcome of an accepted roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollReport {
    pub roll: Roll,
    /// Amount credited to the bank by settlement (zero unless the roll won the round).
    pub credited: u64,
    /// The roll emptied the bank and ended the session.
    pub session_over: bool,
}

/// Engine and ledger for a single-player session.
pub struct Table<R: RollSource = DiceRng> {
    engine: GameEngine<R>,
    ledger: Ledger,
    started: bool,
}

impl<R: RollSource> Table<R> {
    pub fn new(dice: R) -> Self {
        Self {
            engine: GameEngine::new(dice),
            ledger: Ledger::new(),
            started: false,
        }
    }

    /// Register one observer for both the engine's and the ledger's notifications.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        let shared = Rc::new(RefCell::new(observer));
        let engine_side = Rc::clone(&shared);
        self.engine
            .subscribe(move |event: &Event| engine_side.borrow_mut().notify(event));
        self.ledger
            .subscribe(move |event: &Event| shared.borrow_mut().notify(event));
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// A round has been started and not yet abandoned by a reset or bankruptcy.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn fund_bank(&mut self, amount: u64) -> Result<(), TableError> {
        if self.ledger.bank_confirmed() {
            return Err(IllegalOperation::BankLocked.into());
        }
        self.ledger.fund_bank(amount)
    }

    pub fn confirm_bank(&mut self) -> Result<(), TableError> {
        if self.ledger.bank_confirmed() {
            return Err(IllegalOperation::BankLocked.into());
        }
        self.ledger.confirm_bank()
    }

    pub fn place_bet(&mut self, amount: u64) -> Result<u64, TableError> {
        self.ensure_bet_adjustable()?;
        self.ledger.place_bet(amount)
    }

    /// Add one chip to the bet.
    pub fn increase_bet(&mut self, increment: BetIncrement) -> Result<u64, TableError> {
        self.ensure_bet_adjustable()?;
        let requested = self.ledger.bet().saturating_add(increment.amount());
        if requested > self.ledger.bank() {
            return Err(TableError::InsufficientFunds {
                requested,
                available: self.ledger.bank(),
            });
        }
        self.ledger.adjust_bet(increment.amount())
    }

    /// Wager the whole bank. Returns false (and does nothing) unless the bet is below
    /// the remaining bank.
    pub fn all_in(&mut self) -> Result<bool, TableError> {
        self.ensure_bet_adjustable()?;
        if self.ledger.bet() >= self.ledger.bank() {
            debug!(
                bet = self.ledger.bet(),
                bank = self.ledger.bank(),
                "all in ignored"
            );
            return Ok(false);
        }
        self.ledger.all_in();
        Ok(true)
    }

    /// Begin the first round once bank and bet are confirmed.
    pub fn start_round(&mut self) -> Result<(), TableError> {
        if self.started {
            return Err(self.round_state_error().into());
        }
        if !self.ledger.bank_confirmed() || !self.ledger.bet_confirmed() {
            return Err(IllegalOperation::RoundNotConfirmed.into());
        }
        self.engine.soft_reset();
        self.engine.start_round();
        self.started = true;
        info!(
            bank = self.ledger.bank(),
            bet = self.ledger.bet(),
            "round started"
        );
        Ok(())
    }

    /// Roll the dice, settling the bet and checking for bankruptcy when the round resolves.
    ///
    /// Returns `None` when no round is live.
    pub fn roll(&mut self) -> Option<RollReport> {
        if !self.started || !self.ledger.bet_confirmed() {
            debug!(started = self.started, "roll ignored");
            return None;
        }
        let roll = self.engine.roll()?;
        if !roll.resolution.is_decisive() {
            return Some(RollReport {
                roll,
                credited: 0,
                session_over: false,
            });
        }

        let credited = self.ledger.settle_from(&self.engine);
        let session_over = self.engine.check_bank_balance(&mut self.ledger);
        if session_over {
            self.started = false;
        }
        Some(RollReport {
            roll,
            credited,
            session_over,
        })
    }

    /// Start the next round with the same bet.
    ///
    /// Returns true when the next round is live. Returns false when the session ended on
    /// an empty bank, or when the bank can no longer cover the standing bet; in the latter
    /// case the bet is cleared and a new one must be placed before [`Table::start_round`].
    pub fn play_again(&mut self) -> Result<bool, TableError> {
        if !self.started {
            return Err(IllegalOperation::RoundNotConfirmed.into());
        }
        if self.engine.is_active() {
            return Err(IllegalOperation::RoundInProgress.into());
        }
        if self.engine.check_bank_balance(&mut self.ledger) {
            self.started = false;
            return Ok(false);
        }

        match self.ledger.renew_bet() {
            Ok(_) => {
                self.engine.soft_reset();
                self.engine.start_round();
                Ok(true)
            }
            Err(TableError::InsufficientFunds {
                requested,
                available,
            }) => {
                info!(requested, available, "bet no longer covered");
                self.ledger.clear_bet();
                self.engine.soft_reset();
                self.started = false;
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Clear everything: win counters, bank, bet and both confirmations.
    pub fn reset(&mut self) {
        info!(
            player_wins = self.engine.player_wins(),
            house_wins = self.engine.house_wins(),
            "table reset"
        );
        self.engine.hard_reset();
        self.ledger.reset_bank_and_bet();
        self.started = false;
    }

    fn ensure_bet_adjustable(&self) -> Result<(), TableError> {
        // Funding sets the bank absolutely, so nothing may be escrowed while it is open.
        if !self.ledger.bank_confirmed() {
            return Err(IllegalOperation::BankNotConfirmed.into());
        }
        // The standing bet is not escrowed between resolution and the next round.
        if self.started && !self.engine.is_active() {
            return Err(IllegalOperation::RoundResolved.into());
        }
        Ok(())
    }

    fn round_state_error(&self) -> IllegalOperation {
        if self.engine.is_active() {
            IllegalOperation::RoundInProgress
        } else {
            IllegalOperation::RoundResolved
        }
    }
}
