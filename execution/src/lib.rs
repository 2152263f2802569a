//! Craps execution layer.
//!
//! This crate contains the round state machine ([`GameEngine`]), bank and bet bookkeeping
//! ([`Ledger`]), and the [`Table`] that sequences them for a single player.
//!
//! ## Determinism requirements
//! - The only source of randomness is the [`RollSource`] handed to the engine.
//! - Given the same seed and session, [`DiceRng`] produces the same dice forever.
//! - Notifications are delivered synchronously and in emission order.
//!
//! ## Minimal session (example)
//! ```rust
//! use craps_execution::{DiceRng, Table};
//!
//! let mut table = Table::new(DiceRng::new([7u8; 32], 1));
//! table.subscribe(|event: &craps_types::Event| println!("{}", event.name()));
//! table.fund_bank(1_000)?;
//! table.confirm_bank()?;
//! table.place_bet(100)?;
//! table.start_round()?;
//! while let Some(report) = table.roll() {
//!     if report.roll.resolution.is_decisive() {
//!         break;
//!     }
//! }
//! # Ok::<(), craps_types::TableError>(())
//! ```

pub mod dice;
pub mod engine;
pub mod ledger;
pub mod observer;
pub mod table;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use dice::{DiceRng, RollSource, SEED_LENGTH};
pub use engine::{resolve, GameEngine};
pub use ledger::Ledger;
pub use observer::{Channel, Notifier, Observer};
pub use table::{RollReport, Table};
