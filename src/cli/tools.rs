//! Tool commands: list definitions, run a call.

use clap::Subcommand;
use serde_json::Value;

use crate::pricing::PricingPolicy;
use crate::storage::TripLog;
use crate::tools::{Toolbox, definitions};

#[derive(Debug, Subcommand)]
pub enum ToolsCommand {
    /// Print every tool definition (name, description, JSON Schema parameters).
    List,

    /// Run one tool call and print its JSON result.
    Call {
        /// Tool name, e.g. `reserve_flight`.
        name: String,

        /// Arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

pub(super) fn cmd_list() -> Result<(), String> {
    let json = serde_json::to_string_pretty(&definitions())
        .map_err(|e| format!("failed to serialize tool definitions: {e}"))?;
    println!("{json}");
    Ok(())
}

pub(super) fn cmd_call<P: PricingPolicy>(
    log: &TripLog,
    pricing: &P,
    name: &str,
    args: &str,
) -> Result<(), String> {
    let args: Value =
        serde_json::from_str(args).map_err(|e| format!("invalid --args JSON: {e}"))?;

    let result = Toolbox::new(log, pricing)
        .call(name, &args)
        .map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(&result)
        .map_err(|e| format!("failed to serialize result: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::ReservationKind;

    fn floor_price(kind: ReservationKind) -> u32 {
        *kind.cost_range().start()
    }

    #[test]
    fn call_rejects_malformed_args() {
        let dir = TempDir::new().unwrap();
        let log = TripLog::new(dir.path().join("trip_log.json"));

        let err = cmd_call(&log, &floor_price, "reserve_flight", "{date").unwrap_err();

        assert!(err.starts_with("invalid --args JSON"));
    }

    #[test]
    fn call_books_through_the_toolbox() {
        let dir = TempDir::new().unwrap();
        let log = TripLog::new(dir.path().join("trip_log.json"));

        cmd_call(
            &log,
            &floor_price,
            "reserve_restaurant",
            r#"{"reservation_time": "2024-12-02T20:30:00", "restaurant": "Gustu",
                "city": "La Paz", "dish": "Llama"}"#,
        )
        .unwrap();

        assert_eq!(log.load().unwrap().len(), 1);
    }
}
