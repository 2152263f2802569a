use anyhow::{Context, Result};
use clap::{Arg, Command};
use craps_randotron::{Config, Engine};
use std::str::FromStr;
use tracing::{info, Level};

fn main() -> Result<()> {
    // Parse arguments
    let matches = Command::new("randotron")
        .about("Play craps sessions with a scripted bettor.")
        .arg(Arg::new("config").long("config").required(true))
        .get_matches();

    // Load from config file
    let config_file = matches
        .get_one::<String>("config")
        .context("missing --config")?;
    let config_file = std::fs::read_to_string(config_file)
        .with_context(|| format!("could not read config file {config_file}"))?;
    let config: Config =
        serde_yaml::from_str(&config_file).context("could not parse config file")?;

    // Setup logging
    let level = Level::from_str(&config.log_level).context("invalid log level")?;
    let subscriber = tracing_subscriber::fmt().with_max_level(level);
    if config.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let engine_config = config.engine_config()?;
    info!(
        sessions = engine_config.sessions,
        max_rounds = engine_config.max_rounds,
        starting_bank = engine_config.starting_bank,
        base_bet = engine_config.base_bet,
        strategy = ?engine_config.strategy,
        seed = commonware_utils::hex(&engine_config.seed),
        "Starting randotron"
    );

    // Play
    let summary = Engine::new(engine_config).run();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
