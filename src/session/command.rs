use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::util::parse_game_date;

/// One line typed into the session. The first word names the action.
#[derive(Parser, Debug)]
#[command(multicall = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, Eq, PartialEq)]
pub enum SessionCommand {
    /// Select the batter by name
    Batter {
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Select the game date (YYYY-MM-DD or "today")
    Date {
        #[arg(value_parser = parse_game_date)]
        date: NaiveDate,
    },
    /// List the known batters
    Batters,
    /// Go on to hit entry for the selected batter and date
    #[command(alias = "next")]
    Continue,
    /// Inning (1-20)
    Inning {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Plate appearance number (1 or more)
    Pa {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Outs before the pitch (0-2)
    Outs {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Balls in the count (0-3)
    Balls {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Strikes in the count (0-2)
    Strikes {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Men on base: None, 1B, 2B, 3B, 1B & 2B, 1B & 3B, 2B & 3B, Bases Loaded
    Runners {
        #[arg(required = true)]
        value: Vec<String>,
    },
    /// Outcome category of the play, one of those listed on the hit screen
    Outcome {
        #[arg(required = true)]
        value: Vec<String>,
    },
    /// How the batter got out or reached base
    Detail {
        #[arg(required = true)]
        value: Vec<String>,
    },
    /// Direction of the hit, or "none" to clear it
    Direction {
        #[arg(required = true)]
        value: Vec<String>,
    },
    /// Save the hit
    Submit,
    /// Reload the hits recorded for this batter and date
    Show,
    /// Return to batter and date selection
    Back,
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

impl SessionLine {
    pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, clap::Error> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(None);
        }
        Self::try_parse_from(words).map(|parsed| Some(parsed.command))
    }
}
