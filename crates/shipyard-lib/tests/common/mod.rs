// Shared fixtures for `shipyard-lib` integration tests
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use shipyard_lib::rating::calculate_rating;
use shipyard_lib::{InMemoryShipStore, Ship, ShipCatalog, ShipDraft, ShipType};
use std::sync::Arc;

/// Mid-year instant, so the local-time year matches `year` in every time zone.
pub fn prod_date(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0)
        .single()
        .expect("valid fixture date")
}

/// Builder to create `Ship` instances in tests with sensible defaults.
pub struct ShipBuilder {
    ship: Ship,
}

impl ShipBuilder {
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self {
            ship: Ship {
                id,
                name: format!("Ship {id}"),
                planet: "Earth".to_string(),
                ship_type: ShipType::Transport,
                prod_date: prod_date(3000),
                is_used: false,
                speed: 0.5,
                crew_size: 100,
                rating: 0.0,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.ship.name = name.to_string();
        self
    }

    pub fn planet(mut self, planet: &str) -> Self {
        self.ship.planet = planet.to_string();
        self
    }

    pub fn ship_type(mut self, ship_type: ShipType) -> Self {
        self.ship.ship_type = ship_type;
        self
    }

    pub fn year(mut self, year: i32) -> Self {
        self.ship.prod_date = prod_date(year);
        self
    }

    pub fn used(mut self, is_used: bool) -> Self {
        self.ship.is_used = is_used;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.ship.speed = speed;
        self
    }

    pub fn crew(mut self, crew_size: i32) -> Self {
        self.ship.crew_size = crew_size;
        self
    }

    /// Build with the rating derived from the current fields.
    pub fn build(mut self) -> Ship {
        self.ship.rating =
            calculate_rating(self.ship.speed, self.ship.is_used, &self.ship.prod_date);
        self.ship
    }
}

pub fn draft(name: &str, planet: &str, year: i32, speed: f64, crew_size: i32) -> ShipDraft {
    ShipDraft {
        name: name.to_string(),
        planet: planet.to_string(),
        ship_type: ShipType::Merchant,
        prod_date: prod_date(year),
        is_used: None,
        speed,
        crew_size,
    }
}

/// A small fleet with deliberate ties on speed, date and rating.
///
/// | id | name          | planet  | type      | year | used  | speed | crew |
/// |----|---------------|---------|-----------|------|-------|-------|------|
/// | 1  | Orion III     | Mars    | MERCHANT  | 2995 | true  | 0.82  | 617  |
/// | 2  | Daedalus      | Jupiter | MILITARY  | 3001 | false | 0.50  | 3000 |
/// | 3  | Eagle Transit | Earth   | TRANSPORT | 3019 | false | 0.50  | 12   |
/// | 4  | Orion II      | Neptune | MERCHANT  | 3000 | true  | 0.99  | 40   |
/// | 5  | Eagle         | Mars    | MILITARY  | 3001 | false | 0.50  | 9999 |
/// | 6  | Vostok        | earth   | TRANSPORT | 2800 | true  | 0.01  | 1    |
pub fn fleet() -> Vec<Ship> {
    vec![
        ShipBuilder::new(1)
            .name("Orion III")
            .planet("Mars")
            .ship_type(ShipType::Merchant)
            .year(2995)
            .used(true)
            .speed(0.82)
            .crew(617)
            .build(),
        ShipBuilder::new(2)
            .name("Daedalus")
            .planet("Jupiter")
            .ship_type(ShipType::Military)
            .year(3001)
            .speed(0.5)
            .crew(3000)
            .build(),
        ShipBuilder::new(3)
            .name("Eagle Transit")
            .planet("Earth")
            .ship_type(ShipType::Transport)
            .year(3019)
            .speed(0.5)
            .crew(12)
            .build(),
        ShipBuilder::new(4)
            .name("Orion II")
            .planet("Neptune")
            .ship_type(ShipType::Merchant)
            .year(3000)
            .used(true)
            .speed(0.99)
            .crew(40)
            .build(),
        ShipBuilder::new(5)
            .name("Eagle")
            .planet("Mars")
            .ship_type(ShipType::Military)
            .year(3001)
            .speed(0.5)
            .crew(9999)
            .build(),
        ShipBuilder::new(6)
            .name("Vostok")
            .planet("earth")
            .ship_type(ShipType::Transport)
            .year(2800)
            .used(true)
            .speed(0.01)
            .crew(1)
            .build(),
    ]
}

pub fn fleet_catalog() -> ShipCatalog {
    ShipCatalog::new(Arc::new(InMemoryShipStore::with_ships(fleet())))
}

pub fn ids(ships: &[Ship]) -> Vec<i64> {
    ships.iter().map(|ship| ship.id).collect()
}
