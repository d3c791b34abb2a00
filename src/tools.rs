//! Agent-callable tools: definitions to register and a dispatcher to run calls.
//!
//! An agent orchestrator registers [`definitions`] and, when its model asks
//! for a tool, hands the name and JSON arguments to [`Toolbox::call`].
//! Reservation tools answer with the booked record; the report tool
//! answers with text, including when the log is missing or unreadable.

use serde::Serialize;
use serde_json::{Value, json};

use crate::booking::{Booker, BookingError};
use crate::pricing::PricingPolicy;
use crate::report;
use crate::storage::TripLog;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("tool '{tool}' requires string argument '{argument}'")]
    MissingArgument {
        tool: &'static str,
        argument: &'static str,
    },

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// What an orchestrator needs to offer a tool to a model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the argument object.
    pub parameters: Value,
}

struct ToolShape {
    name: &'static str,
    description: &'static str,
    params: &'static [(&'static str, &'static str)],
}

const TOOLS: &[ToolShape] = &[
    ToolShape {
        name: "reserve_flight",
        description: "Book a flight between two cities for a specific date.",
        params: &[
            ("date_str", "Flight date in ISO format (YYYY-MM-DD)."),
            ("departure", "Departure city."),
            ("destination", "Destination city."),
        ],
    },
    ToolShape {
        name: "reserve_bus",
        description: "Book a bus trip between two cities on a specific date.",
        params: &[
            ("date_str", "Trip date in ISO format (YYYY-MM-DD)."),
            ("departure", "Departure city."),
            ("destination", "Destination city."),
        ],
    },
    ToolShape {
        name: "reserve_hotel",
        description: "Book a hotel in a specific city between two dates.",
        params: &[
            ("checkin_date", "Check-in date in ISO format (YYYY-MM-DD)."),
            ("checkout_date", "Check-out date in ISO format (YYYY-MM-DD)."),
            ("hotel_name", "Hotel name."),
            ("city", "City where the reservation is made."),
        ],
    },
    ToolShape {
        name: "reserve_restaurant",
        description: "Make a reservation at a restaurant in a specific city for a given time.",
        params: &[
            ("reservation_time", "Reservation time in ISO format (YYYY-MM-DDTHH:MM:SS)."),
            ("restaurant", "Restaurant name."),
            ("city", "City where the restaurant is located."),
            ("dish", "Dish to be ordered."),
        ],
    },
    ToolShape {
        name: "generate_trip_report",
        description: "Summarize every reservation made so far, grouped by city, \
                      with the total budget for the trip.",
        params: &[],
    },
];

/// Definitions for every tool, in a stable order.
pub fn definitions() -> Vec<ToolDefinition> {
    TOOLS
        .iter()
        .map(|tool| {
            let properties: serde_json::Map<String, Value> = tool
                .params
                .iter()
                .map(|(name, description)| {
                    (
                        (*name).to_string(),
                        json!({ "type": "string", "description": description }),
                    )
                })
                .collect();
            let required: Vec<&str> = tool.params.iter().map(|(name, _)| *name).collect();
            ToolDefinition {
                name: tool.name,
                description: tool.description,
                parameters: json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }),
            }
        })
        .collect()
}

/// Runs tool calls against a trip log.
pub struct Toolbox<'a, P> {
    log: &'a TripLog,
    booker: Booker<'a, P>,
}

impl<'a, P: PricingPolicy> Toolbox<'a, P> {
    pub fn new(log: &'a TripLog, pricing: &'a P) -> Self {
        Self {
            log,
            booker: Booker::new(log, pricing),
        }
    }

    /// Executes the tool `name` with a JSON object of arguments.
    pub fn call(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        let reservation = match name {
            "reserve_flight" => {
                let arg = |key| string_arg(args, "reserve_flight", key);
                self.booker
                    .reserve_flight(arg("date_str")?, arg("departure")?, arg("destination")?)?
            }
            "reserve_bus" => {
                let arg = |key| string_arg(args, "reserve_bus", key);
                self.booker
                    .reserve_bus(arg("date_str")?, arg("departure")?, arg("destination")?)?
            }
            "reserve_hotel" => {
                let arg = |key| string_arg(args, "reserve_hotel", key);
                self.booker.reserve_hotel(
                    arg("checkin_date")?,
                    arg("checkout_date")?,
                    arg("hotel_name")?,
                    arg("city")?,
                )?
            }
            "reserve_restaurant" => {
                let arg = |key| string_arg(args, "reserve_restaurant", key);
                self.booker.reserve_restaurant(
                    arg("reservation_time")?,
                    arg("restaurant")?,
                    arg("city")?,
                    arg("dish")?,
                )?
            }
            "generate_trip_report" => return Ok(Value::String(report::render(self.log))),
            other => return Err(ToolError::UnknownTool(other.to_string())),
        };
        Ok(serde_json::to_value(reservation)?)
    }
}

fn string_arg<'v>(
    args: &'v Value,
    tool: &'static str,
    argument: &'static str,
) -> Result<&'v str, ToolError> {
    args.get(argument)
        .and_then(Value::as_str)
        .ok_or(ToolError::MissingArgument { tool, argument })
}
