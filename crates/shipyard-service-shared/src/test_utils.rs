//! Test utilities for handler testing.
//!
//! Provides a small fixed fleet and [`AppState`] values seeded with it. Each
//! call to [`test_state`] returns an independent catalog, so tests that write
//! do not affect each other.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use shipyard_lib::query::DEFAULT_PAGE_SIZE;
use shipyard_lib::rating::calculate_rating;
use shipyard_lib::{InMemoryShipStore, Ship, ShipCatalog, ShipId, ShipType};

use crate::state::{AppState, StoreBackend};

/// Ids of the fixture fleet, in insertion order.
pub mod fixture_ships {
    use shipyard_lib::ShipId;

    /// "Orion III", used merchant from 2995, speed 0.82.
    pub const ORION_III: ShipId = 1;
    /// "Daedalus", new military ship from 3001, speed 0.5.
    pub const DAEDALUS: ShipId = 2;
    /// "Eagle Transit", new transport from 3019, rating 40.
    pub const EAGLE_TRANSIT: ShipId = 3;
    /// "Orion II", used merchant from 3000, speed 0.99.
    pub const ORION_II: ShipId = 4;
    /// "Eagle", new military ship from 3001, crew 9999.
    pub const EAGLE: ShipId = 5;
    /// "Vostok", used transport from 2800, rating 0.
    pub const VOSTOK: ShipId = 6;

    pub const FLEET_SIZE: usize = 6;
}

/// Mid-year production date, so the local-time year matches `year` everywhere.
pub fn prod_date(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid fixture year {year}"))
}

/// Epoch milliseconds of [`prod_date`].
pub fn prod_millis(year: i32) -> i64 {
    prod_date(year).timestamp_millis()
}

#[allow(clippy::too_many_arguments)]
fn ship(
    id: ShipId,
    name: &str,
    planet: &str,
    ship_type: ShipType,
    year: i32,
    is_used: bool,
    speed: f64,
    crew_size: i32,
) -> Ship {
    let prod_date = prod_date(year);
    Ship {
        id,
        name: name.to_string(),
        planet: planet.to_string(),
        ship_type,
        prod_date,
        is_used,
        speed,
        crew_size,
        rating: calculate_rating(speed, is_used, &prod_date),
    }
}

/// The fixture fleet, ordered by id.
pub fn fleet() -> Vec<Ship> {
    use self::fixture_ships::*;
    vec![
        ship(ORION_III, "Orion III", "Mars", ShipType::Merchant, 2995, true, 0.82, 617),
        ship(DAEDALUS, "Daedalus", "Jupiter", ShipType::Military, 3001, false, 0.5, 3000),
        ship(EAGLE_TRANSIT, "Eagle Transit", "Earth", ShipType::Transport, 3019, false, 0.5, 12),
        ship(ORION_II, "Orion II", "Neptune", ShipType::Merchant, 3000, true, 0.99, 40),
        ship(EAGLE, "Eagle", "Mars", ShipType::Military, 3001, false, 0.5, 9999),
        ship(VOSTOK, "Vostok", "earth", ShipType::Transport, 2800, true, 0.01, 1),
    ]
}

/// Fresh in-memory state seeded with [`fleet`] and the default page size.
pub fn test_state() -> AppState {
    let store = InMemoryShipStore::with_ships(fleet());
    AppState::from_catalog(
        ShipCatalog::new(Arc::new(store)),
        StoreBackend::Memory,
        DEFAULT_PAGE_SIZE,
    )
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_contains_fleet() {
        let state = test_state();
        assert_eq!(state.catalog().list().unwrap(), fleet());
        assert_eq!(fleet().len(), fixture_ships::FLEET_SIZE);
    }

    #[test]
    fn test_states_are_independent() {
        let first = test_state();
        let second = test_state();
        assert!(first.catalog().delete(fixture_ships::EAGLE).unwrap());
        assert_eq!(second.catalog().len().unwrap(), fixture_ships::FLEET_SIZE);
    }

    #[test]
    fn test_fixture_ratings() {
        let ships = fleet();
        assert_eq!(ships[2].rating, 40.0);
        assert_eq!(ships[3].rating, 1.98);
        assert_eq!(ships[5].rating, 0.0);
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}
