#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{AppConfig, ConfigArgs};
use crate::session::{events_table, Session};
use crate::store::{HitStore, SqliteStore};
use crate::util::{join_words, parse_game_date};

mod config;
mod hit_entry;
mod session;
mod store;
mod util;

const ABOUT: &str = "Records pitch-by-pitch hitting events for a batter into a local database.";

#[derive(Parser, Debug)]
#[command(name = "hitting-chart", about = ABOUT)]
struct Opt {
    #[command(flatten)]
    config: ConfigArgs,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enter hits interactively (the default)
    Session,
    /// Show or register batters
    #[command(subcommand)]
    Batters(BattersCommand),
    /// Print the hits recorded for a batter on a game date
    Events {
        #[arg(long)]
        batter: String,
        #[arg(long, value_parser = parse_game_date)]
        date: NaiveDate,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum BattersCommand {
    /// List known batters alphabetically
    List,
    /// Register a batter name
    Add {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

const fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn run_command<S: HitStore>(store: &S, config: &AppConfig, command: Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match command {
        Command::Session => {
            let stdin = io::stdin();
            Session::new(store, config.rules, util::today()).run(stdin.lock(), &mut out)?;
        }
        Command::Batters(BattersCommand::List) => {
            for name in store.list_batter_names()? {
                writeln!(out, "{name}")?;
            }
        }
        Command::Batters(BattersCommand::Add { name }) => {
            let name = join_words(&name);
            store
                .add_batter(&name)
                .with_context(|| format!("Failed to add batter {name}"))?;
            writeln!(out, "Added {name}")?;
        }
        Command::Events { batter, date, json } => {
            let events = store
                .list_hit_events(batter.trim(), date)
                .with_context(|| format!("Failed to load hits for {batter} on {date}"))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&events)?)?;
            } else {
                events_table(&mut out, &events)?;
            }
        }
    }
    Ok(())
}

#[allow(clippy::expect_used)]
fn main() -> Result<()> {
    let opt = Opt::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(opt.verbose))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let config = AppConfig::from(opt.config);
    let store = SqliteStore::open(&config.database)
        .with_context(|| format!("Failed to open database {}", config.database.display()))?;
    info!(database = %config.database.display(), "Database ready");

    run_command(&store, &config, opt.command.unwrap_or(Command::Session))
}
