//! Dice outcome generation.
//!
//! The engine only needs a stream of fair faces. [`DiceRng`] derives them from a SHA256
//! hash chain so that any session can be replayed from its seed; tests swap in scripted
//! sources through [`RollSource`].

use commonware_cryptography::sha256::Sha256;
use commonware_cryptography::Hasher;
use craps_types::table::DIE_FACES;
use rand::{rngs::OsRng, RngCore};

/// Length of a dice seed in bytes.
pub const SEED_LENGTH: usize = 32;

/// Source of single die faces in `1..=6`.
pub trait RollSource {
    /// Roll one die.
    fn roll_die(&mut self) -> u8;

    /// Roll two independent dice.
    fn roll_pair(&mut self) -> (u8, u8) {
        let first = self.roll_die();
        let second = self.roll_die();
        (first, second)
    }
}

impl<R: RollSource + ?Sized> RollSource for Box<R> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// Deterministic dice generator seeded per session.
#[derive(Clone)]
pub struct DiceRng {
    seed: [u8; SEED_LENGTH],
    state: [u8; 32],
    index: usize,
}

impl DiceRng {
    /// Create a generator from a seed and session id.
    pub fn new(seed: [u8; SEED_LENGTH], session: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(&seed);
        hasher.update(&session.to_be_bytes());
        Self {
            seed,
            state: hasher.finalize().0,
            index: 0,
        }
    }

    /// Create a generator from operating system entropy.
    pub fn from_entropy(session: u64) -> Self {
        let mut seed = [0u8; SEED_LENGTH];
        OsRng.fill_bytes(&mut seed);
        Self::new(seed, session)
    }

    /// Seed this generator was built from (log it to replay a session).
    pub fn seed(&self) -> &[u8; SEED_LENGTH] {
        &self.seed
    }

    /// Take the next byte of the chain, hashing the spent digest into a fresh one.
    fn next_byte(&mut self) -> u8 {
        if self.index == self.state.len() {
            let mut hasher = Sha256::new();
            hasher.update(&self.state);
            self.state = hasher.finalize().0;
            self.index = 0;
        }
        let byte = self.state[self.index];
        self.index += 1;
        byte
    }
}

/// Bytes at or above this value are discarded so every face keeps the same odds.
const FAIR_BYTE_LIMIT: u8 = u8::MAX - u8::MAX % DIE_FACES;

impl RollSource for DiceRng {
    fn roll_die(&mut self) -> u8 {
        loop {
            let byte = self.next_byte();
            if byte < FAIR_BYTE_LIMIT {
                return byte % DIE_FACES + 1;
            }
        }
    }
}
