//! Trip report: the log read back, grouped by city, with a budget total.
//!
//! ```text
//! City: Santa Cruz
//! - flight on 2024-12-01 - Cost: $500
//! - hotel on 2024-12-01 - Cost: $180
//!
//! City: La Paz
//! - restaurant on 2024-12-02T20:30:00 - Cost: $42
//!
//! Total budget for the trip: $722
//! ```

use std::{fmt, io};

use serde_json::Value;
use tracing::{debug, warn};

use crate::model::LogEntry;
use crate::storage::{StorageError, TripLog};

/// Fields naming where an activity happens, most specific first.
const CITY_FIELDS: &[&str] = &["city", "destination"];

/// Fields naming when an activity happens, most specific first.
const DATE_FIELDS: &[&str] = &["date", "checkin_date", "reservation_time"];

const UNKNOWN: &str = "Unknown";

/// Errors that stop a report from being generated.
///
/// The messages double as the text handed back to tool callers.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Error: trip log file not found.")]
    NotFound,

    #[error("Error: Could not decode the trip log file.")]
    CorruptLog,

    #[error("Error: could not read the trip log file: {0}")]
    Io(#[from] io::Error),
}

impl From<StorageError> for ReportError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => Self::NotFound,
            StorageError::Corrupt(_) | StorageError::Json(_) => Self::CorruptLog,
            StorageError::Io(e) => Self::Io(e),
        }
    }
}

/// One booked activity as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub reservation_type: String,
    pub date: String,
    pub cost: u64,
}

/// Every activity in one city, in booking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityActivities {
    pub city: String,
    pub activities: Vec<Activity>,
}

/// A summary of the whole trip log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripReport {
    /// Cities in order of their first booking.
    pub cities: Vec<CityActivities>,
    pub total: u64,
}

impl TripReport {
    /// Reads the trip log and summarizes it. The log is not modified.
    pub fn generate(log: &TripLog) -> Result<Self, ReportError> {
        let entries = log.load()?;
        Self::from_entries(&entries)
    }

    /// Summarizes log entries.
    ///
    /// Missing fields fall back to `Unknown` (city, date) or zero (cost).
    /// A cost that is present but not a non-negative integer, or a total too large
    /// to count, fails the whole report.
    pub fn from_entries(entries: &[LogEntry]) -> Result<Self, ReportError> {
        let mut report = Self::default();

        for entry in entries {
            let cost = match entry.get("cost") {
                None => 0,
                Some(value) => value.as_u64().ok_or(ReportError::CorruptLog)?,
            };
            let activity = Activity {
                reservation_type: entry.reservation_type().unwrap_or("unknown").to_string(),
                date: entry.first_of(DATE_FIELDS).map_or_else(|| UNKNOWN.to_string(), display),
                cost,
            };
            let city = entry
                .first_of(CITY_FIELDS)
                .map_or_else(|| UNKNOWN.to_string(), display);

            report.total = report
                .total
                .checked_add(cost)
                .ok_or(ReportError::CorruptLog)?;
            match report.cities.iter_mut().find(|c| c.city == city) {
                Some(group) => group.activities.push(activity),
                None => report.cities.push(CityActivities {
                    city,
                    activities: vec![activity],
                }),
            }
        }

        debug!(
            entries = entries.len(),
            cities = report.cities.len(),
            total = report.total,
            "generated trip report"
        );
        Ok(report)
    }
}

impl fmt::Display for TripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.cities {
            writeln!(f, "City: {}", group.city)?;
            for a in &group.activities {
                writeln!(f, "- {} on {} - Cost: ${}", a.reservation_type, a.date, a.cost)?;
            }
            writeln!(f)?;
        }
        write!(f, "Total budget for the trip: ${}", self.total)
    }
}

/// Renders the report for the trip log, or a one-line error narrating why it can't.
///
/// This never fails: tool callers get text either way.
pub fn render(log: &TripLog) -> String {
    match TripReport::generate(log) {
        Ok(report) => report.to_string(),
        Err(e) => {
            warn!(path = %log.path().display(), "trip report failed: {e}");
            e.to_string()
        }
    }
}

/// Strings render bare; anything else renders as JSON.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
