use serde::{Deserialize, Serialize};

use super::RollSnapshot;

/// State-change notification published by the engine or the ledger.
///
/// Delivered synchronously, in emission order, to every subscriber before the
/// triggering operation returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// State snapshot after any accepted roll.
    DiceRolled(RollSnapshot),
    /// The round resolved on the last roll.
    WinLossDecided { player_won: bool },
    /// Bank balance changed.
    BankSet { bank: u64 },
    /// Bet changed.
    BetSet { bet: u64 },
    /// Bank and bet were zeroed.
    BankReset,
    /// Point, total and win counters were cleared.
    DisplayReset,
    /// The bank is exhausted and the session ended.
    SessionOver { bankrupt: bool },
    /// The round transitioned to active.
    RoundStarted { active: bool },
}

impl Event {
    /// Stable notification name.
    pub fn name(&self) -> &'static str {
        match self {
            Event::DiceRolled(_) => "dice_rolled",
            Event::WinLossDecided { .. } => "win_loss_decided",
            Event::BankSet { .. } => "bank_set",
            Event::BetSet { .. } => "bet_set",
            Event::BankReset => "bank_reset",
            Event::DisplayReset => "display_reset",
            Event::SessionOver { .. } => "session_over",
            Event::RoundStarted { .. } => "round_started",
        }
    }
}
