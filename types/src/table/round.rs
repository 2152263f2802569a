use serde::{Deserialize, Serialize};

use super::NO_POINT;

/// Where a round currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No point established; the next roll is a come-out roll.
    ComeOut,
    /// A point is established and must be repeated before a seven.
    Point,
    /// The round was won or lost; no roll is accepted until a reset.
    Resolved,
}

/// Outcome of a single roll with respect to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Natural on the come-out, or the point was repeated.
    PlayerWin,
    /// Craps on the come-out, or seven-out during the point phase.
    HouseWin,
    /// A come-out total of 4, 5, 6, 8, 9 or 10 became the point.
    PointEstablished(u8),
    /// Point phase roll that neither hit the point nor a seven.
    NoDecision,
}

impl Resolution {
    /// Returns true if the roll ended the round.
    pub fn is_decisive(&self) -> bool {
        matches!(self, Resolution::PlayerWin | Resolution::HouseWin)
    }

    /// `Some(true)` for a player win, `Some(false)` for a house win, `None` otherwise.
    pub fn player_won(&self) -> Option<bool> {
        match self {
            Resolution::PlayerWin => Some(true),
            Resolution::HouseWin => Some(false),
            _ => None,
        }
    }
}

/// A pair of dice and what they meant for the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    pub dice1: u8,
    pub dice2: u8,
    pub total: u8,
    pub resolution: Resolution,
}

/// Game state owned by the engine, mutated in place for the whole session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub dice1: u8,
    pub dice2: u8,
    /// `dice1 + dice2`, or 0 after a reset.
    pub total: u8,
    /// 0 while in the come-out phase.
    pub point: u8,
    /// True while a round is in progress and rolling is permitted.
    pub active: bool,
    /// Meaningful only immediately after a round resolves.
    pub game_won: bool,
    pub player_wins: u32,
    pub house_wins: u32,
    /// Rolls taken since the round last (re)started.
    pub rolls: u32,
}

impl RoundState {
    /// Fresh state for a new session: come-out phase, live, counters at zero.
    pub fn new() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.active {
            Phase::Resolved
        } else if self.point == NO_POINT {
            Phase::ComeOut
        } else {
            Phase::Point
        }
    }

    pub fn snapshot(&self) -> RollSnapshot {
        RollSnapshot::from(self)
    }
}

/// Payload of the "dice rolled" notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollSnapshot {
    pub dice1: u8,
    pub dice2: u8,
    pub total: u8,
    pub point: u8,
    pub player_wins: u32,
    pub house_wins: u32,
}

impl From<&RoundState> for RollSnapshot {
    fn from(state: &RoundState) -> Self {
        Self {
            dice1: state.dice1,
            dice2: state.dice2,
            total: state.total,
            point: state.point,
            player_wins: state.player_wins,
            house_wins: state.house_wins,
        }
    }
}

/// Fixed chip increments offered for raising a bet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetIncrement {
    One,
    Five,
    Ten,
    Fifty,
    Hundred,
    FiveHundred,
}

impl BetIncrement {
    pub const ALL: [BetIncrement; 6] = [
        BetIncrement::One,
        BetIncrement::Five,
        BetIncrement::Ten,
        BetIncrement::Fifty,
        BetIncrement::Hundred,
        BetIncrement::FiveHundred,
    ];

    pub fn amount(self) -> u64 {
        match self {
            BetIncrement::One => 1,
            BetIncrement::Five => 5,
            BetIncrement::Ten => 10,
            BetIncrement::Fifty => 50,
            BetIncrement::Hundred => 100,
            BetIncrement::FiveHundred => 500,
        }
    }

    /// Largest increment that is no more than `limit`, if any.
    pub fn largest_within(limit: u64) -> Option<BetIncrement> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|increment| increment.amount() <= limit)
    }
}
