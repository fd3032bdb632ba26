use std::path::PathBuf;

use clap::Args;

use crate::hit_entry::FormRules;

pub const DEFAULT_DATABASE: &str = "hitting_chart.db";

/// Settings shared by every command. Each flag can also come from the environment.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// SQLite database file holding batters and hit events
    #[arg(long, env = "HITTING_CHART_DATABASE", default_value = DEFAULT_DATABASE, global = true)]
    pub database: PathBuf,

    /// Refuse to submit a hit until its direction is chosen
    #[arg(long, env = "HITTING_CHART_REQUIRE_DIRECTION", global = true)]
    pub require_direction: bool,

    /// Offer the Ball and Other outcome categories
    #[arg(long, env = "HITTING_CHART_EXTENDED_OUTCOMES", global = true)]
    pub extended_outcomes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: PathBuf,
    pub rules: FormRules,
}

impl From<ConfigArgs> for AppConfig {
    fn from(args: ConfigArgs) -> Self {
        Self {
            database: args.database,
            rules: FormRules {
                require_direction: args.require_direction,
                extended_outcomes: args.extended_outcomes,
            },
        }
    }
}
