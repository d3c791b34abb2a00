//! Placeholder pricing: a cost per reservation, drawn from a fixed range per kind.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::model::ReservationKind;

impl ReservationKind {
    /// The inclusive range a reservation of this kind is priced within.
    pub fn cost_range(self) -> RangeInclusive<u32> {
        match self {
            Self::Flight => 200..=700,
            Self::Bus => 20..=100,
            Self::Hotel => 50..=300,
            Self::Restaurant => 10..=50,
        }
    }
}

/// Assigns a cost to a new reservation.
///
/// Any `Fn(ReservationKind) -> u32` is a policy, so callers can pin prices.
pub trait PricingPolicy {
    fn price(&self, kind: ReservationKind) -> u32;
}

impl<F> PricingPolicy for F
where
    F: Fn(ReservationKind) -> u32,
{
    fn price(&self, kind: ReservationKind) -> u32 {
        self(kind)
    }
}

/// Uniformly random cost within [`ReservationKind::cost_range`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPricing;

impl PricingPolicy for RandomPricing {
    fn price(&self, kind: ReservationKind) -> u32 {
        rand::rng().random_range(kind.cost_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [ReservationKind; 4] = [
        ReservationKind::Flight,
        ReservationKind::Bus,
        ReservationKind::Hotel,
        ReservationKind::Restaurant,
    ];

    #[test]
    fn random_prices_stay_in_range() {
        for kind in KINDS {
            let range = kind.cost_range();
            for _ in 0..500 {
                let cost = RandomPricing.price(kind);
                assert!(range.contains(&cost), "{kind}: {cost} outside {range:?}");
            }
        }
    }

    #[test]
    fn closures_are_policies() {
        let fixed = |kind: ReservationKind| *kind.cost_range().start();

        assert_eq!(fixed.price(ReservationKind::Flight), 200);
        assert_eq!(fixed.price(ReservationKind::Restaurant), 10);
    }
}
