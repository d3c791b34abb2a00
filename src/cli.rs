//! CLI interface for tripbook.
//!
//! Designed for agents and humans alike. Each subcommand is non-interactive:
//! arguments in, output on stdout. Diagnostics go to stderr.
//!
//! - `tripbook reserve flight|bus|hotel|restaurant` books and records a reservation.
//! - `tripbook report` summarizes the trip log.
//! - `tripbook tools list|call` is the surface an agent orchestrator registers.
//! - `tripbook config` shows where everything lives.

mod reserve;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::pricing::RandomPricing;
use crate::report;
use crate::storage::TripLog;

use reserve::ReserveCommand;
use tools::ToolsCommand;

/// tripbook: book a trip, then see what it costs.
#[derive(Debug, Parser)]
#[command(name = "tripbook", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Trip log to read and write.
    /// Overrides `TRIPBOOK_TRIP_LOG` and `~/.tripbook/config.toml`.
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: planning a trip
  1. tripbook reserve flight 2024-12-01 "La Paz" "Santa Cruz"
  2. tripbook reserve hotel 2024-12-01 2024-12-04 "Los Tajibos" "Santa Cruz"
  3. tripbook reserve restaurant 2024-12-02T20:30:00 Jardín "Santa Cruz" Majadito
  4. tripbook report

Agents:
  tripbook tools list
  tripbook tools call reserve_bus --args '{"date_str":"2024-12-05","departure":"Sucre","destination":"Potosí"}'"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Book a reservation and record it in the trip log.
    ///
    /// The cost is a placeholder drawn at random for the reservation kind.
    /// Prints the recorded reservation as JSON.
    Reserve {
        #[command(subcommand)]
        kind: ReserveCommand,
    },

    /// Summarize the trip log: activities grouped by city and the total budget.
    ///
    /// A missing or unreadable log is reported as text, not as a failure.
    Report,

    /// Agent tool surface: list definitions or run a call.
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },

    /// Print the resolved configuration as JSON.
    Config,
}

/// Run a parsed command, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let log = TripLog::new(&config.trip_log_path);
    let pricing = RandomPricing;

    match cli.command {
        Command::Reserve { kind } => reserve::cmd_reserve(&log, &pricing, kind),
        Command::Report => {
            println!("{}", report::render(&log));
            Ok(())
        }
        Command::Tools { command } => match command {
            ToolsCommand::List => tools::cmd_list(),
            ToolsCommand::Call { name, args } => tools::cmd_call(&log, &pricing, &name, &args),
        },
        Command::Config => cmd_config(config),
    }
}

fn cmd_config(config: &Config) -> Result<(), String> {
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| format!("failed to serialize config: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_log_after_subcommand() {
        let cli = Cli::try_parse_from(["tripbook", "report", "--log", "/tmp/trip.json"]).unwrap();

        assert_eq!(cli.log, Some(PathBuf::from("/tmp/trip.json")));
        assert!(matches!(cli.command, Command::Report));
    }

    #[test]
    fn parses_reserve_hotel() {
        let cli = Cli::try_parse_from([
            "tripbook",
            "reserve",
            "hotel",
            "2024-12-01",
            "2024-12-04",
            "Los Tajibos",
            "Santa Cruz",
        ])
        .unwrap();

        let Command::Reserve {
            kind: ReserveCommand::Hotel { hotel_name, .. },
        } = cli.command
        else {
            panic!("expected reserve hotel");
        };
        assert_eq!(hotel_name, "Los Tajibos");
    }

    #[test]
    fn reserve_requires_every_argument() {
        let result = Cli::try_parse_from(["tripbook", "reserve", "flight", "2024-12-01", "La Paz"]);

        assert!(result.is_err());
    }
}
