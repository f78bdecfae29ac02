mod common;

use shipyard_lib::rating::{calculate_rating, rating_for};
use shipyard_lib::ship::prod_year;

use common::{prod_date, ShipBuilder};

#[test]
fn new_ship_from_the_current_year_rates_forty() {
    let rating = calculate_rating(0.50, false, &prod_date(3019));
    assert_eq!(rating, 40.0);
}

#[test]
fn used_ship_from_3000_rates_one_ninety_eight() {
    let rating = calculate_rating(0.99, true, &prod_date(3000));
    assert_eq!(rating, 1.98);
}

#[test]
fn used_ships_rate_half_of_new_ones_before_rounding() {
    let new = calculate_rating(0.80, false, &prod_date(3015));
    let used = calculate_rating(0.80, true, &prod_date(3015));
    // 64 / 5 = 12.8 and 32 / 5 = 6.4
    assert_eq!(new, 12.8);
    assert_eq!(used, 6.4);
}

#[test]
fn oldest_ships_have_the_largest_denominator() {
    // 80 * 0.99 / 220 = 0.36
    assert_eq!(calculate_rating(0.99, false, &prod_date(2800)), 0.36);
}

#[test]
fn rating_is_rounded_to_two_decimals() {
    // 80 * 0.5 / 19 = 2.105..
    assert_eq!(calculate_rating(0.5, false, &prod_date(3001)), 2.11);
}

#[test]
fn rating_for_uses_current_ship_fields() {
    let ship = ShipBuilder::new(1).year(2995).used(true).speed(0.82).build();
    assert_eq!(prod_year(&ship.prod_date), 2995);
    assert_eq!(rating_for(&ship), 1.31);
}
