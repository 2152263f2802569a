use craps_execution::{RollReport, RollSource, Table};
use craps_types::{BetIncrement, Phase};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How the bot sizes its wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Strategy {
    /// Bet the base amount every round.
    Flat,
    /// Bet the base amount, and sometimes add a chip once a point is on.
    Press { increment: BetIncrement },
    /// Push the whole bank in before a fresh start, then let that stake ride on later rounds.
    AllIn,
}

/// Next command the bot issues to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fund(u64),
    ConfirmBank,
    Bet(u64),
    Press(BetIncrement),
    AllIn,
    Start,
    Roll,
    PlayAgain,
    Leave,
}

/// A single player working through one session.
pub struct Bot {
    strategy: Strategy,
    starting_bank: u64,
    base_bet: u64,
    max_rounds: u64,

    rounds: u64,
    funded: bool,
    bankrupt: bool,
    pressed: bool,
}

impl Bot {
    pub fn new(strategy: Strategy, starting_bank: u64, base_bet: u64, max_rounds: u64) -> Self {
        Self {
            strategy,
            starting_bank,
            base_bet,
            max_rounds,
            rounds: 0,
            funded: false,
            bankrupt: false,
            pressed: false,
        }
    }

    /// Rounds resolved so far.
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    pub fn bankrupt(&self) -> bool {
        self.bankrupt
    }

    /// Decide what to do given what the table shows.
    pub fn next<R: RollSource, G: Rng>(&mut self, table: &Table<R>, rng: &mut G) -> Action {
        if self.bankrupt {
            return Action::Leave;
        }
        let ledger = table.ledger();
        let engine = table.engine();

        if !ledger.bank_confirmed() {
            if !self.funded {
                return Action::Fund(self.starting_bank);
            }
            return Action::ConfirmBank;
        }

        if !table.is_started() {
            if !ledger.bet_confirmed() {
                if ledger.bank() == 0 || self.rounds >= self.max_rounds {
                    return Action::Leave;
                }
                return Action::Bet(self.base_bet.clamp(1, ledger.bank()));
            }
            if self.strategy == Strategy::AllIn && ledger.bet() < ledger.bank() {
                return Action::AllIn;
            }
            return Action::Start;
        }

        if engine.is_active() {
            if let Strategy::Press { increment } = self.strategy {
                if engine.phase() == Phase::Point && !self.pressed && rng.gen_bool(0.5) {
                    // Fall back to a smaller chip when the preferred one is not covered
                    let headroom = ledger.bank().saturating_sub(ledger.bet());
                    if let Some(chip) =
                        BetIncrement::largest_within(headroom.min(increment.amount()))
                    {
                        return Action::Press(chip);
                    }
                }
            }
            return Action::Roll;
        }

        if self.rounds >= self.max_rounds {
            return Action::Leave;
        }
        Action::PlayAgain
    }

    /// Record that an action was carried out.
    pub fn applied(&mut self, action: Action) {
        match action {
            Action::Fund(_) => self.funded = true,
            Action::Press(_) => self.pressed = true,
            Action::Start | Action::PlayAgain => self.pressed = false,
            _ => {}
        }
    }

    /// Record the outcome of a roll.
    pub fn observe(&mut self, report: &RollReport) {
        if report.roll.resolution.is_decisive() {
            self.rounds += 1;
            debug!(
                rounds = self.rounds,
                total = report.roll.total,
                credited = report.credited,
                "round finished"
            );
        }
        if report.session_over {
            self.bankrupt = true;
        }
    }
}
