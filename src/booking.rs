//! Booking: turn plain text arguments into priced, recorded reservations.
//!
//! Each `reserve_*` call parses its dates first, so a bad date never
//! reaches the log. Calls are not idempotent: booking the same thing
//! twice records two reservations.

use jiff::civil::{Date, DateTime};
use tracing::info;

use crate::model::{
    HotelReservation, Reservation, ReservationKind, RestaurantReservation, TripReservation,
};
use crate::pricing::PricingPolicy;
use crate::storage::{StorageError, TripLog};

/// Errors that can occur while booking.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("invalid {field} '{value}': expected {expected}")]
    InvalidDate {
        field: &'static str,
        value: String,
        expected: &'static str,
        #[source]
        source: Option<jiff::Error>,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = core::result::Result<T, BookingError>;

/// Books reservations against a trip log with a given pricing policy.
pub struct Booker<'a, P> {
    log: &'a TripLog,
    pricing: &'a P,
}

impl<'a, P: PricingPolicy> Booker<'a, P> {
    pub fn new(log: &'a TripLog, pricing: &'a P) -> Self {
        Self { log, pricing }
    }

    /// Books a flight between two cities on `date` (`YYYY-MM-DD`).
    pub fn reserve_flight(
        &self,
        date: &str,
        departure: &str,
        destination: &str,
    ) -> Result<Reservation> {
        let trip = self.trip(ReservationKind::Flight, date, departure, destination)?;
        info!(%departure, %destination, date = %trip.date, "booking flight");
        self.record(Reservation::Flight(trip))
    }

    /// Books a bus trip between two cities on `date` (`YYYY-MM-DD`).
    pub fn reserve_bus(
        &self,
        date: &str,
        departure: &str,
        destination: &str,
    ) -> Result<Reservation> {
        let trip = self.trip(ReservationKind::Bus, date, departure, destination)?;
        info!(%departure, %destination, date = %trip.date, "booking bus");
        self.record(Reservation::Bus(trip))
    }

    /// Books a hotel in `city` between two `YYYY-MM-DD` dates.
    ///
    /// Check-out before check-in is accepted as given.
    pub fn reserve_hotel(
        &self,
        checkin_date: &str,
        checkout_date: &str,
        hotel_name: &str,
        city: &str,
    ) -> Result<Reservation> {
        let checkin = parse_date("checkin_date", checkin_date)?;
        let checkout = parse_date("checkout_date", checkout_date)?;
        info!(%hotel_name, %city, %checkin, %checkout, "booking hotel");

        self.record(Reservation::Hotel(HotelReservation {
            checkin_date: checkin,
            checkout_date: checkout,
            hotel_name: hotel_name.to_string(),
            city: city.to_string(),
            cost: self.pricing.price(ReservationKind::Hotel),
        }))
    }

    /// Books a table at `restaurant` for an ISO-8601 date-time.
    pub fn reserve_restaurant(
        &self,
        reservation_time: &str,
        restaurant: &str,
        city: &str,
        dish: &str,
    ) -> Result<Reservation> {
        let time = parse_datetime("reservation_time", reservation_time)?;
        info!(%restaurant, %city, %dish, %time, "booking restaurant");

        self.record(Reservation::Restaurant(RestaurantReservation {
            reservation_time: time,
            restaurant: restaurant.to_string(),
            city: city.to_string(),
            dish: dish.to_string(),
            cost: self.pricing.price(ReservationKind::Restaurant),
        }))
    }

    fn trip(
        &self,
        kind: ReservationKind,
        date: &str,
        departure: &str,
        destination: &str,
    ) -> Result<TripReservation> {
        Ok(TripReservation {
            departure: departure.to_string(),
            destination: destination.to_string(),
            date: parse_date("date", date)?,
            cost: self.pricing.price(kind),
        })
    }

    fn record(&self, reservation: Reservation) -> Result<Reservation> {
        self.log.append(&reservation)?;
        Ok(reservation)
    }
}

const PLAIN_DATE: &str = "an ISO-8601 date (YYYY-MM-DD)";
const LOCAL_DATETIME: &str = "an ISO-8601 date-time without offset (YYYY-MM-DDTHH:MM:SS)";

/// Accepts exactly `YYYY-MM-DD`. jiff also takes a trailing time, offset or
/// zone annotation and drops them; those are refused instead.
fn parse_date(field: &'static str, value: &str) -> Result<Date> {
    let date: Date = value
        .parse()
        .map_err(|e| invalid(field, value, PLAIN_DATE, Some(e)))?;
    if date.to_string() != value {
        return Err(invalid(field, value, PLAIN_DATE, None));
    }
    Ok(date)
}

/// Accepts a plain date followed by an optional `T`/space and wall-clock time.
/// A civil time can't carry an offset or zone, so inputs with one are refused.
fn parse_datetime(field: &'static str, value: &str) -> Result<DateTime> {
    let time: DateTime = value
        .parse()
        .map_err(|e| invalid(field, value, LOCAL_DATETIME, Some(e)))?;

    let (day, rest) = value.split_at_checked(10).unwrap_or((value, ""));
    let plain_day = day.parse::<Date>().is_ok_and(|d| d.to_string() == day);
    let wall_clock = rest.is_empty()
        || (rest.starts_with(['T', 't', ' ']) && !rest.contains(['+', '-', 'Z', 'z', '[']));
    if !plain_day || !wall_clock {
        return Err(invalid(field, value, LOCAL_DATETIME, None));
    }
    Ok(time)
}

fn invalid(
    field: &'static str,
    value: &str,
    expected: &'static str,
    source: Option<jiff::Error>,
) -> BookingError {
    BookingError::InvalidDate {
        field,
        value: value.to_string(),
        expected,
        source,
    }
}
