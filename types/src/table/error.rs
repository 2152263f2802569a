use thiserror::Error as ThisError;

/// Action the table refused because of where the session currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IllegalOperation {
    /// Starting a round requires both a confirmed bank and a confirmed bet.
    RoundNotConfirmed,
    /// Bets are taken only once the bank is confirmed.
    BankNotConfirmed,
    /// The round is still live (rolling is permitted), so it cannot be restarted.
    RoundInProgress,
    /// The round has resolved and the bet is no longer escrowed; play again first.
    RoundResolved,
    /// The bank was confirmed and can no longer be funded directly.
    BankLocked,
}

impl std::fmt::Display for IllegalOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            IllegalOperation::RoundNotConfirmed => "bank and bet must both be confirmed",
            IllegalOperation::BankNotConfirmed => "bank must be confirmed before betting",
            IllegalOperation::RoundInProgress => "round is still in progress",
            IllegalOperation::RoundResolved => "round has resolved",
            IllegalOperation::BankLocked => "bank is already confirmed",
        };
        f.write_str(reason)
    }
}

/// Errors surfaced to the caller of a funding, betting, or round-control operation.
#[derive(Clone, Copy, Debug, ThisError, PartialEq, Eq)]
pub enum TableError {
    #[error("amount must be greater than zero (got={amount})")]
    InvalidAmount { amount: u64 },
    #[error("insufficient funds (requested={requested}, available={available})")]
    InsufficientFunds { requested: u64, available: u64 },
    #[error("illegal operation: {0}")]
    IllegalOperation(IllegalOperation),
}

impl From<IllegalOperation> for TableError {
    fn from(op: IllegalOperation) -> Self {
        TableError::IllegalOperation(op)
    }
}
