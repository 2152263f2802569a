//! Bank and bet bookkeeping.
//!
//! Funds are escrowed at wager time: raising the bet debits the bank immediately, so a
//! lost round needs no further action and a won round credits the stake plus equal
//! winnings. A bet never decreases while it is standing.

use crate::dice::RollSource;
use crate::engine::GameEngine;
use crate::observer::{Notifier, Observer};
use craps_types::table::WIN_RETURN_MULTIPLIER;
use craps_types::{Event, TableError};
use tracing::{debug, info};

/// Bank balance, standing bet, and the confirmations that gate a round.
#[derive(Default)]
pub struct Ledger {
    bank: u64,
    bet: u64,
    bank_confirmed: bool,
    bet_confirmed: bool,
    notifier: Notifier,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        self.notifier.subscribe(observer);
    }

    pub fn bank(&self) -> u64 {
        self.bank
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn bank_confirmed(&self) -> bool {
        self.bank_confirmed
    }

    pub fn bet_confirmed(&self) -> bool {
        self.bet_confirmed
    }

    /// Set the bank to `amount` (absolute, not additive).
    pub fn fund_bank(&mut self, amount: u64) -> Result<(), TableError> {
        if amount == 0 {
            return Err(TableError::InvalidAmount { amount });
        }
        self.bank = amount;
        debug!(bank = self.bank, "bank funded");
        self.notifier.emit(Event::BankSet { bank: self.bank });
        Ok(())
    }

    /// Lock in the current bank as the session's starting funds.
    pub fn confirm_bank(&mut self) -> Result<(), TableError> {
        if self.bank == 0 {
            return Err(TableError::InvalidAmount { amount: 0 });
        }
        self.bank_confirmed = true;
        Ok(())
    }

    /// Raise the bet to `amount`, escrowing the difference from the bank.
    ///
    /// A request below the standing bet is floored at the standing bet. Returns the
    /// resulting bet. On error nothing changes.
    pub fn place_bet(&mut self, amount: u64) -> Result<u64, TableError> {
        if amount > self.bank {
            return Err(TableError::InsufficientFunds {
                requested: amount,
                available: self.bank,
            });
        }
        if amount == 0 {
            return Err(TableError::InvalidAmount { amount });
        }

        let bet = amount.max(self.bet);
        // bet - self.bet <= amount <= bank
        self.bank -= bet - self.bet;
        self.bet = bet;
        self.bet_confirmed = true;
        debug!(bet, bank = self.bank, requested = amount, "bet placed");
        self.notifier.emit(Event::BetSet { bet });
        Ok(bet)
    }

    /// Raise the bet by `delta`. Callers check `bet + delta <= bank` first.
    pub fn adjust_bet(&mut self, delta: u64) -> Result<u64, TableError> {
        self.place_bet(self.bet.saturating_add(delta))
    }

    /// Fold the bet back into the bank and wager all of it.
    pub fn all_in(&mut self) {
        let total = self.bank.saturating_add(self.bet);
        self.bet = total;
        self.bank = 0;
        self.bet_confirmed = total > 0;
        debug!(bet = total, "all in");
        self.notifier.emit(Event::BetSet { bet: total });
        self.notifier.emit(Event::BankSet { bank: 0 });
    }

    /// Escrow the standing bet again for a following round.
    pub fn renew_bet(&mut self) -> Result<u64, TableError> {
        if self.bet == 0 {
            return Err(TableError::InvalidAmount { amount: 0 });
        }
        if self.bet > self.bank {
            return Err(TableError::InsufficientFunds {
                requested: self.bet,
                available: self.bank,
            });
        }
        self.bank -= self.bet;
        self.bet_confirmed = true;
        debug!(bet = self.bet, bank = self.bank, "bet renewed");
        self.notifier.emit(Event::BetSet { bet: self.bet });
        Ok(self.bet)
    }

    /// Drop a standing bet that is no longer escrowed, without touching the bank.
    pub fn clear_bet(&mut self) {
        self.bet = 0;
        self.bet_confirmed = false;
        debug!(bank = self.bank, "bet cleared");
        self.notifier.emit(Event::BetSet { bet: 0 });
    }

    /// Pay out a resolved round. Returns the amount credited to the bank.
    ///
    /// A win returns the stake plus equal winnings; a loss forfeits the escrowed stake.
    pub fn settle_round(&mut self, player_won: bool) -> u64 {
        if !player_won {
            info!(bet = self.bet, bank = self.bank, "bet lost");
            return 0;
        }
        let credit = self.bet.saturating_mul(WIN_RETURN_MULTIPLIER);
        self.bank = self.bank.saturating_add(credit);
        info!(bet = self.bet, credit, bank = self.bank, "bet won");
        self.notifier.emit(Event::BankSet { bank: self.bank });
        credit
    }

    /// Settle against the engine's outcome for the round that just resolved.
    pub fn settle_from<R: RollSource>(&mut self, engine: &GameEngine<R>) -> u64 {
        if engine.is_active() {
            debug!("settlement skipped: round still live");
            return 0;
        }
        self.settle_round(engine.game_won())
    }

    /// Zero bank and bet and clear both confirmations.
    pub fn reset_bank_and_bet(&mut self) {
        self.bank = 0;
        self.bet = 0;
        self.bank_confirmed = false;
        self.bet_confirmed = false;
        self.notifier.emit(Event::BankReset);
    }

    /// Announce that the session is over.
    pub fn game_end(&mut self) {
        self.notifier.emit(Event::SessionOver {
            bankrupt: self.bank == 0,
        });
    }
}
