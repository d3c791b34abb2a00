//! The trip log: every reservation ever made, in booking order.
//!
//! A single JSON array on disk, pretty-printed:
//!
//! ```text
//! <trip_log.json>        # [ { "reservation_type": "flight", ... }, ... ]
//! <trip_log.json>.lock   # held exclusively while the array is rewritten; left in place
//! <trip_log.json>.tmp    # next contents, renamed over the log when complete
//! ```
//!
//! Appending rewrites the whole array. The lock keeps concurrent writers
//! from losing each other's entries; the rename keeps readers from seeing
//! a half-written file.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::model::{LogEntry, Reservation};

/// Errors that can occur while reading or writing the trip log.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("trip log not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("trip log is not a JSON array of objects: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// File-backed, append-only log of reservations.
#[derive(Debug, Clone)]
pub struct TripLog {
    path: PathBuf,
}

impl TripLog {
    /// Creates a handle on the log at `path`. Nothing is touched on disk until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a reservation to the end of the log.
    ///
    /// A missing log starts out empty. An existing log that fails to parse
    /// is left untouched and reported as [`StorageError::Corrupt`].
    pub fn append(&self, reservation: &Reservation) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let _lock = self.lock()?;

        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StorageError::NotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        entries.push(serde_json::from_value(serde_json::to_value(reservation)?)?);

        let tmp = self.sibling(".tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;

        info!(
            kind = %reservation.kind(),
            cost = reservation.cost(),
            entries = entries.len(),
            path = %self.path.display(),
            "recorded reservation"
        );
        Ok(())
    }

    /// Loads every entry in the log, in booking order.
    pub fn load(&self) -> Result<Vec<LogEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let entries: Vec<LogEntry> =
            serde_json::from_str(&contents).map_err(StorageError::Corrupt)?;
        debug!(entries = entries.len(), path = %self.path.display(), "loaded trip log");
        Ok(entries)
    }

    /// Takes the writer lock. Released when the returned file is dropped.
    fn lock(&self) -> Result<fs::File> {
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.sibling(".lock"))?;
        file.lock()?;
        Ok(file)
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use jiff::civil::date;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::model::{HotelReservation, TripReservation};

    fn test_log() -> (TempDir, TripLog) {
        let dir = TempDir::new().unwrap();
        let log = TripLog::new(dir.path().join("trip_log.json"));
        (dir, log)
    }

    fn sample_flight(cost: u32) -> Reservation {
        Reservation::Flight(TripReservation {
            departure: "La Paz".into(),
            destination: "Santa Cruz".into(),
            date: date(2024, 12, 1),
            cost,
        })
    }

    fn sample_hotel() -> Reservation {
        Reservation::Hotel(HotelReservation {
            checkin_date: date(2024, 12, 1),
            checkout_date: date(2024, 12, 4),
            hotel_name: "Los Tajibos".into(),
            city: "Santa Cruz".into(),
            cost: 180,
        })
    }

    #[test]
    fn append_and_load_in_order() {
        let (_dir, log) = test_log();

        log.append(&sample_flight(500)).unwrap();
        log.append(&sample_hotel()).unwrap();
        log.append(&sample_flight(250)).unwrap();

        let entries = log.load().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].reservation_type(), Some("flight"));
        assert_eq!(entries[1].reservation_type(), Some("hotel"));
        assert_eq!(entries[2].get("cost"), Some(&json!(250)));
    }

    #[test]
    fn identical_reservations_are_not_merged() {
        let (_dir, log) = test_log();

        log.append(&sample_flight(500)).unwrap();
        log.append(&sample_flight(500)).unwrap();

        assert_eq!(log.load().unwrap().len(), 2);
    }

    #[test]
    fn log_file_is_a_json_array() {
        let (_dir, log) = test_log();
        log.append(&sample_flight(500)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(log.path()).unwrap()).unwrap();
        assert_eq!(
            raw,
            json!([{
                "reservation_type": "flight",
                "departure": "La Paz",
                "destination": "Santa Cruz",
                "date": "2024-12-01",
                "cost": 500,
            }])
        );
    }

    #[test]
    fn append_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let log = TripLog::new(dir.path().join("nested").join("deeper").join("log.json"));

        log.append(&sample_hotel()).unwrap();

        assert_eq!(log.load().unwrap().len(), 1);
    }

    #[test]
    fn load_missing_log_fails() {
        let (_dir, log) = test_log();
        let err = log.load().unwrap_err();

        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[test]
    fn load_corrupt_log_fails() {
        let (_dir, log) = test_log();
        fs::write(log.path(), "{ not json").unwrap();

        assert!(matches!(log.load().unwrap_err(), StorageError::Corrupt(_)));
    }

    #[test]
    fn load_non_array_log_fails() {
        let (_dir, log) = test_log();
        fs::write(log.path(), r#"{"reservation_type": "flight"}"#).unwrap();

        assert!(matches!(log.load().unwrap_err(), StorageError::Corrupt(_)));
    }

    #[test]
    fn append_leaves_corrupt_log_untouched() {
        let (_dir, log) = test_log();
        fs::write(log.path(), "garbage").unwrap();

        let err = log.append(&sample_flight(500)).unwrap_err();

        assert!(matches!(err, StorageError::Corrupt(_)));
        assert_eq!(fs::read_to_string(log.path()).unwrap(), "garbage");
    }

    #[test]
    fn concurrent_appends_keep_every_entry() {
        let (_dir, log) = test_log();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                thread::spawn(move || {
                    for j in 0..5 {
                        log.append(&sample_flight(200 + i * 10 + j)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.load().unwrap().len(), 40);
    }
}
