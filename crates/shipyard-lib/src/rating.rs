//! Ship rating calculation.
//!
//! The rating is a derived attribute: it is recomputed from `speed`, `is_used`
//! and the production year on every write and is never accepted from callers.

use chrono::{DateTime, Utc};

use crate::ship::{prod_year, Ship, PROD_YEAR_MAX};

/// Numerator scale of the rating formula.
pub const RATING_SCALE: f64 = 80.0;

/// Wear factor applied to used ships; new ships use 1.0.
pub const USED_WEAR_FACTOR: f64 = 0.5;

/// Round to two decimals, half up (towards positive infinity): `floor(x * 100 + 0.5) / 100`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Compute the rating for the given (already rounded) speed, wear and production date.
///
/// `rating = round2(80 * speed * wear / (3019 - year + 1))`. The production
/// year is taken in local time and must lie in the accepted era, which keeps
/// the denominator at one or more.
pub fn calculate_rating(speed: f64, is_used: bool, prod_date: &DateTime<Utc>) -> f64 {
    let wear = if is_used { USED_WEAR_FACTOR } else { 1.0 };
    let age = f64::from(PROD_YEAR_MAX - prod_year(prod_date)) + 1.0;
    round2(RATING_SCALE * speed * wear / age)
}

/// Rating for a ship's current field values.
pub fn rating_for(ship: &Ship) -> f64 {
    calculate_rating(ship.speed, ship.is_used, &ship.prod_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.124), 0.12);
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn round2_is_idempotent() {
        for v in [0.01, 0.5, 0.99, 1.98, 40.0] {
            assert_eq!(round2(round2(v)), round2(v));
        }
    }
}
