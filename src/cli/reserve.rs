//! Reservation commands: flight, bus, hotel, restaurant.

use clap::Subcommand;

use crate::booking::Booker;
use crate::pricing::PricingPolicy;
use crate::storage::TripLog;

#[derive(Debug, Subcommand)]
pub enum ReserveCommand {
    /// Book a flight between two cities.
    Flight {
        /// Flight date (YYYY-MM-DD).
        date: String,
        /// Departure city.
        departure: String,
        /// Destination city.
        destination: String,
    },

    /// Book a bus trip between two cities.
    Bus {
        /// Trip date (YYYY-MM-DD).
        date: String,
        /// Departure city.
        departure: String,
        /// Destination city.
        destination: String,
    },

    /// Book a hotel stay.
    Hotel {
        /// Check-in date (YYYY-MM-DD).
        checkin_date: String,
        /// Check-out date (YYYY-MM-DD).
        checkout_date: String,
        /// Hotel name.
        hotel_name: String,
        /// City the hotel is in.
        city: String,
    },

    /// Book a table at a restaurant.
    Restaurant {
        /// Reservation time (YYYY-MM-DDTHH:MM:SS).
        reservation_time: String,
        /// Restaurant name.
        restaurant: String,
        /// City the restaurant is in.
        city: String,
        /// Dish to be ordered.
        dish: String,
    },
}

pub(super) fn cmd_reserve<P: PricingPolicy>(
    log: &TripLog,
    pricing: &P,
    command: ReserveCommand,
) -> Result<(), String> {
    let booker = Booker::new(log, pricing);

    let reservation = match command {
        ReserveCommand::Flight {
            date,
            departure,
            destination,
        } => booker.reserve_flight(&date, &departure, &destination),
        ReserveCommand::Bus {
            date,
            departure,
            destination,
        } => booker.reserve_bus(&date, &departure, &destination),
        ReserveCommand::Hotel {
            checkin_date,
            checkout_date,
            hotel_name,
            city,
        } => booker.reserve_hotel(&checkin_date, &checkout_date, &hotel_name, &city),
        ReserveCommand::Restaurant {
            reservation_time,
            restaurant,
            city,
            dish,
        } => booker.reserve_restaurant(&reservation_time, &restaurant, &city, &dish),
    }
    .map_err(|e| format!("failed to book: {e}"))?;

    let json = serde_json::to_string_pretty(&reservation)
        .map_err(|e| format!("failed to serialize reservation: {e}"))?;
    println!("{json}");

    eprintln!(
        "Booked {} for ${} → {}",
        reservation.kind(),
        reservation.cost(),
        log.path().display()
    );
    Ok(())
}
