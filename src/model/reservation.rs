//! Reservation types: immutable records of one booked activity.

use std::fmt;

use jiff::civil::{Date, DateTime};
use serde::{Deserialize, Serialize};

/// A booked activity, serialized as one flat object in the trip log.
///
/// The `reservation_type` tag sits next to the record's own fields,
/// so every log entry is self-describing when read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reservation_type", rename_all = "lowercase")]
pub enum Reservation {
    /// A flight between two cities.
    Flight(TripReservation),

    /// A bus trip between two cities.
    Bus(TripReservation),

    /// A hotel stay.
    Hotel(HotelReservation),

    /// A table at a restaurant.
    Restaurant(RestaurantReservation),
}

impl Reservation {
    /// The kind of this reservation.
    pub fn kind(&self) -> ReservationKind {
        match self {
            Self::Flight(_) => ReservationKind::Flight,
            Self::Bus(_) => ReservationKind::Bus,
            Self::Hotel(_) => ReservationKind::Hotel,
            Self::Restaurant(_) => ReservationKind::Restaurant,
        }
    }

    /// What the reservation costs, in whole dollars.
    pub fn cost(&self) -> u32 {
        match self {
            Self::Flight(trip) | Self::Bus(trip) => trip.cost,
            Self::Hotel(hotel) => hotel.cost,
            Self::Restaurant(restaurant) => restaurant.cost,
        }
    }
}

/// Travel between two cities on a given day. Shared by flights and buses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripReservation {
    pub departure: String,
    pub destination: String,
    pub date: Date,
    pub cost: u32,
}

/// A hotel stay. Check-in is expected on or before check-out but not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelReservation {
    pub checkin_date: Date,
    pub checkout_date: Date,
    pub hotel_name: String,
    pub city: String,
    pub cost: u32,
}

/// A table at a restaurant, at a local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantReservation {
    pub reservation_time: DateTime,
    pub restaurant: String,
    pub city: String,
    pub dish: String,
    pub cost: u32,
}

/// The kind of a reservation. Drives pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationKind {
    Flight,
    Bus,
    Hotel,
    Restaurant,
}

impl ReservationKind {
    /// The `reservation_type` tag written to the log.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Bus => "bus",
            Self::Hotel => "hotel",
            Self::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for ReservationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
