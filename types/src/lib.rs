//! Common types shared by the craps engine, its ledger, and anything observing them.
//!
//! Nothing in this crate rolls dice or moves chips. It describes the data that flows
//! between the core and its collaborators: round snapshots, notifications, and the
//! error taxonomy returned by funding and betting operations.

pub mod table;

pub use table::{
    BetIncrement, Event, IllegalOperation, Phase, Resolution, Roll, RollSnapshot, RoundState,
    TableError,
};
