mod state_machine;

pub use state_machine::{Action, Bot, Strategy};

use anyhow::{anyhow, Result};
use craps_execution::{DiceRng, RollSource, Table, SEED_LENGTH};
use craps_types::{Event, TableError};
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap, rc::Rc};
use tracing::{info, warn};

/// Configuration for the randotron engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub sessions: u64,
    pub max_rounds: u64,
    pub starting_bank: u64,
    pub base_bet: u64,
    pub strategy: Strategy,
    pub seed: [u8; SEED_LENGTH],
}

/// Configuration for a randotron run (from config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub sessions: u64,
    pub max_rounds: u64,
    pub starting_bank: u64,
    pub base_bet: u64,
    pub strategy: Strategy,
    /// Hex-encoded 32-byte seed. Drawn from the operating system when absent.
    #[serde(default)]
    pub seed: Option<String>,
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Validate the file contents and resolve the seed.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        if self.starting_bank == 0 {
            return Err(anyhow!("starting_bank must be greater than zero"));
        }
        if self.base_bet == 0 {
            return Err(anyhow!("base_bet must be greater than zero"));
        }
        let seed = match &self.seed {
            Some(seed) => {
                let bytes = commonware_utils::from_hex(seed)
                    .ok_or_else(|| anyhow!("seed is not valid hex"))?;
                <[u8; SEED_LENGTH]>::try_from(bytes.as_slice())
                    .map_err(|_| anyhow!("seed must be exactly {SEED_LENGTH} bytes"))?
            }
            None => {
                let mut seed = [0u8; SEED_LENGTH];
                OsRng.fill_bytes(&mut seed);
                seed
            }
        };
        Ok(EngineConfig {
            sessions: self.sessions,
            max_rounds: self.max_rounds,
            starting_bank: self.starting_bank,
            base_bet: self.base_bet,
            strategy: self.strategy,
            seed,
        })
    }
}

/// Outcome of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub session: u64,
    pub rounds: u64,
    pub player_wins: u64,
    pub house_wins: u64,
    pub bankrupt: bool,
    pub final_bank: u64,
}

/// Totals across every session of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub seed: String,
    pub rounds: u64,
    pub player_wins: u64,
    pub house_wins: u64,
    pub bankruptcies: u64,
    pub notifications: BTreeMap<&'static str, u64>,
    pub sessions: Vec<SessionSummary>,
}

/// Counts the notifications a table publishes.
#[derive(Default)]
struct Tally {
    counts: BTreeMap<&'static str, u64>,
    player_wins: u64,
    house_wins: u64,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        *self.counts.entry(event.name()).or_default() += 1;
        if let Event::WinLossDecided { player_won } = event {
            if *player_won {
                self.player_wins += 1;
            } else {
                self.house_wins += 1;
            }
        }
    }
}

/// Main engine for running the randotron
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Summary {
        // Bot decisions share one stream; dice are derived per session
        let mut rng = ChaCha20Rng::from_seed(self.config.seed);

        let mut summary = Summary {
            seed: commonware_utils::hex(&self.config.seed),
            ..Default::default()
        };
        for session in 0..self.config.sessions {
            let table = Table::new(DiceRng::new(self.config.seed, session));
            let (result, counts) = self.play_session(session, table, &mut rng);
            info!(
                session,
                rounds = result.rounds,
                player_wins = result.player_wins,
                house_wins = result.house_wins,
                bankrupt = result.bankrupt,
                final_bank = result.final_bank,
                "Session complete"
            );

            summary.rounds += result.rounds;
            summary.player_wins += result.player_wins;
            summary.house_wins += result.house_wins;
            summary.bankruptcies += u64::from(result.bankrupt);
            for (name, count) in counts {
                *summary.notifications.entry(name).or_default() += count;
            }
            summary.sessions.push(result);
        }
        info!(
            sessions = self.config.sessions,
            rounds = summary.rounds,
            player_wins = summary.player_wins,
            house_wins = summary.house_wins,
            bankruptcies = summary.bankruptcies,
            "Run complete"
        );
        summary
    }

    fn play_session<R: RollSource, G: Rng>(
        &self,
        session: u64,
        mut table: Table<R>,
        rng: &mut G,
    ) -> (SessionSummary, BTreeMap<&'static str, u64>) {
        let tally = Rc::new(RefCell::new(Tally::default()));
        let observer = Rc::clone(&tally);
        table.subscribe(move |event: &Event| observer.borrow_mut().record(event));

        let mut bot = Bot::new(
            self.config.strategy,
            self.config.starting_bank,
            self.config.base_bet,
            self.config.max_rounds,
        );
        loop {
            let action = bot.next(&table, rng);
            if action == Action::Leave {
                break;
            }
            if let Err(err) = Self::apply(&mut table, &mut bot, action) {
                warn!(session, ?action, %err, "Action rejected");
                break;
            }
            bot.applied(action);
        }

        let tally = tally.borrow();
        let result = SessionSummary {
            session,
            rounds: bot.rounds(),
            player_wins: tally.player_wins,
            house_wins: tally.house_wins,
            bankrupt: bot.bankrupt(),
            final_bank: table.ledger().bank(),
        };
        (result, tally.counts.clone())
    }

    fn apply<R: RollSource>(
        table: &mut Table<R>,
        bot: &mut Bot,
        action: Action,
    ) -> Result<(), TableError> {
        match action {
            Action::Fund(amount) => table.fund_bank(amount),
            Action::ConfirmBank => table.confirm_bank(),
            Action::Bet(amount) => table.place_bet(amount).map(|_| ()),
            Action::Press(increment) => table.increase_bet(increment).map(|_| ()),
            Action::AllIn => table.all_in().map(|_| ()),
            Action::Start => table.start_round(),
            Action::Roll => {
                if let Some(report) = table.roll() {
                    bot.observe(&report);
                }
                Ok(())
            }
            Action::PlayAgain => table.play_again().map(|_| ()),
            Action::Leave => Ok(()),
        }
    }
}
