//! Craps round state machine.
//!
//! Phases:
//! - Come out: no point; 7/11 wins, 2/3/12 loses, anything else becomes the point
//! - Point: repeating the point wins, a seven loses, anything else keeps rolling
//! - Resolved: the round is over; rolls are ignored until a reset
//!
//! The engine owns the dice and the win/loss counters and is the only source of truth
//! for whether a round is live. It reads the [`Ledger`] in exactly one place,
//! [`GameEngine::check_bank_balance`].

use crate::dice::{DiceRng, RollSource};
use crate::ledger::Ledger;
use crate::observer::{Notifier, Observer};
use craps_types::table::{is_point_number, CRAPS, NATURALS, NO_POINT, SEVEN};
use craps_types::{Event, Phase, Resolution, Roll, RoundState};
use tracing::{debug, info};

/// Apply the come-out / point rules to a single total.
pub fn resolve(point: u8, total: u8) -> Resolution {
    if point == NO_POINT {
        if NATURALS.contains(&total) {
            Resolution::PlayerWin
        } else if CRAPS.contains(&total) {
            Resolution::HouseWin
        } else {
            Resolution::PointEstablished(total)
        }
    } else if total == point {
        Resolution::PlayerWin
    } else if total == SEVEN {
        Resolution::HouseWin
    } else {
        Resolution::NoDecision
    }
}

/// Dice, point tracking and win/loss accounting for one session.
pub struct GameEngine<R: RollSource = DiceRng> {
    dice: R,
    state: RoundState,
    notifier: Notifier,
}

impl<R: RollSource> GameEngine<R> {
    /// Start a session in the come-out phase with both counters at zero.
    pub fn new(dice: R) -> Self {
        Self {
            dice,
            state: RoundState::new(),
            notifier: Notifier::new(),
        }
    }

    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        self.notifier.subscribe(observer);
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn game_won(&self) -> bool {
        self.state.game_won
    }

    pub fn point(&self) -> u8 {
        self.state.point
    }

    pub fn player_wins(&self) -> u32 {
        self.state.player_wins
    }

    pub fn house_wins(&self) -> u32 {
        self.state.house_wins
    }

    /// Rolls taken in the current round.
    pub fn roll_count(&self) -> u32 {
        self.state.rolls
    }

    /// Roll both dice and apply the round rules.
    ///
    /// Returns `None` without notifying anyone when the round is not live.
    pub fn roll(&mut self) -> Option<Roll> {
        if !self.state.active {
            debug!(phase = ?self.state.phase(), "roll ignored");
            return None;
        }

        let (dice1, dice2) = self.dice.roll_pair();
        let total = dice1 + dice2;
        let resolution = resolve(self.state.point, total);

        self.state.dice1 = dice1;
        self.state.dice2 = dice2;
        self.state.total = total;
        self.state.rolls = self.state.rolls.saturating_add(1);
        match resolution {
            Resolution::PlayerWin => {
                self.state.player_wins = self.state.player_wins.saturating_add(1);
                self.state.game_won = true;
                self.state.active = false;
            }
            Resolution::HouseWin => {
                self.state.house_wins = self.state.house_wins.saturating_add(1);
                self.state.game_won = false;
                self.state.active = false;
            }
            Resolution::PointEstablished(point) => {
                debug_assert!(is_point_number(point));
                self.state.point = point;
            }
            Resolution::NoDecision => {}
        }
        debug!(
            dice1,
            dice2,
            total,
            point = self.state.point,
            roll = self.state.rolls,
            ?resolution,
            "dice rolled"
        );

        self.notifier.emit(Event::DiceRolled(self.state.snapshot()));
        if let Some(player_won) = resolution.player_won() {
            info!(
                player_won,
                total,
                rolls = self.state.rolls,
                player_wins = self.state.player_wins,
                house_wins = self.state.house_wins,
                "round resolved"
            );
            self.notifier.emit(Event::WinLossDecided { player_won });
        }

        Some(Roll {
            dice1,
            dice2,
            total,
            resolution,
        })
    }

    /// Make the round live and announce it.
    pub fn start_round(&mut self) {
        self.state.active = true;
        self.notifier.emit(Event::RoundStarted { active: true });
    }

    /// Clear point and total between rounds, keeping the win counters.
    pub fn soft_reset(&mut self) {
        self.state.point = NO_POINT;
        self.state.total = 0;
        self.state.rolls = 0;
        self.state.active = true;
    }

    /// Clear point, total and both win counters.
    pub fn hard_reset(&mut self) {
        self.state.point = NO_POINT;
        self.state.total = 0;
        self.state.rolls = 0;
        self.state.player_wins = 0;
        self.state.house_wins = 0;
        self.notifier.emit(Event::DisplayReset);
    }

    /// End the session if the bank is exhausted.
    ///
    /// On an empty bank this resets the ledger, announces the end of the session,
    /// hard-resets the engine and returns true.
    pub fn check_bank_balance(&mut self, ledger: &mut Ledger) -> bool {
        if ledger.bank() != 0 {
            return false;
        }

        info!(
            player_wins = self.state.player_wins,
            house_wins = self.state.house_wins,
            "bank exhausted, session over"
        );
        ledger.reset_bank_and_bet();
        ledger.game_end();
        self.notifier.emit(Event::SessionOver {
            bankrupt: ledger.bank() == 0,
        });
        self.hard_reset();
        true
    }
}
