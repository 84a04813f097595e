use std::path::PathBuf;
use anyhow::{bail, Context};
use chrono::Local;
use clap::Parser;
use env_logger::Env;
use log::error;

use crate::config::Config;
use crate::prompt::TerminalPrompt;

mod config;
mod controller;
mod csv_reader;
mod divvy;
mod ledger;
mod prompt;
mod reconcile;
mod report;
mod transaction;
mod util;

/// Divide shared transactions between people, keeping every decision in an append-only history.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// The directory in which program results are stored
    #[clap(long = "history", default_value = "divvy_history")]
    history_dir: PathBuf,

    /// The transactions to process
    #[clap(long, default_value = "transactions.csv")]
    transactions: PathBuf,

    /// Append to the latest history file instead of creating a new one
    #[clap(long = "continue")]
    continue_last_file: bool,

    /// When transactions settle, their dates and descriptions sometimes change such that they look
    /// like new transactions to divvy. Only transactions older than this are loaded, e.g. 168h or 7d.
    #[clap(long, default_value = "168h", value_parser = util::parse_duration)]
    settlement_period: chrono::Duration,

    /// Match each entry in the history with a transaction and print whatever does not match,
    /// instead of divvying
    #[clap(long)]
    check_history: bool,

    /// Show the totals of a history file
    #[clap(long)]
    sum: Option<PathBuf>,

    /// Config file, by default divvy.toml in the working directory or the user config directory
    #[clap(long)]
    config: Option<PathBuf>,

    /// Person to divvy between, overrides the config. Repeat for each person.
    #[clap(long = "person")]
    people: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli :Cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(ledger_file) = &cli.sum {
        return controller::run_sum(ledger_file);
    }

    controller::prepare_history_dir(&cli.history_dir)?;
    if !cli.transactions.is_file() {
        bail!("transactions file '{}' does not exist", cli.transactions.display());
    }

    let mut config = Config::locate(cli.config.as_deref()).context("error in parameters")?;
    if !cli.people.is_empty() {
        config.people = cli.people.clone();
    }

    let now = Local::now().naive_local();
    let transactions = controller::load_transactions(&cli.transactions, cli.settlement_period, now)?;
    let history = ledger::load_dir(&cli.history_dir).context("failed to load history")?;

    let reconciler = config.identity.reconciler();
    if cli.check_history {
        controller::run_check_history(&reconciler, &transactions, &history, &config.check_history);
        return Ok(());
    }

    let people = config.validated_people().context("error in parameters")?;
    controller::run_divvy(&cli.history_dir, cli.continue_last_file, now, people, &reconciler, &transactions, &history,
                          &mut TerminalPrompt)?;
    Ok(())
}
