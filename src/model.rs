//! Core data model for tripbook.
//!
//! Reservations are the records written to the trip log.
//! Log entries are what the report reads back: flat JSON objects,
//! looked up by field name so older or hand-edited logs still report.

mod entry;
mod reservation;

pub use entry::LogEntry;
pub use reservation::{
    HotelReservation, Reservation, ReservationKind, RestaurantReservation, TripReservation,
};
