//! Ship entity model.
//!
//! [`Ship`] is the persisted record. [`ShipDraft`] and [`ShipPatch`] are the
//! only shapes callers can hand to the catalog; neither carries an id or a
//! rating, so the derived rating can never be set from outside.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Numeric identifier for a stored ship.
pub type ShipId = i64;

/// Maximum length, in characters, of `name` and `planet`.
pub const NAME_MAX_LEN: usize = 50;

/// Earliest accepted production year.
pub const PROD_YEAR_MIN: i32 = 2800;

/// Latest accepted production year; also the "current year" of the rating formula.
pub const PROD_YEAR_MAX: i32 = 3019;

pub const SPEED_MIN: f64 = 0.01;
pub const SPEED_MAX: f64 = 0.99;

pub const CREW_SIZE_MIN: i32 = 1;
pub const CREW_SIZE_MAX: i32 = 9999;

/// Calendar year of a production date in the server's local time zone.
pub fn prod_year(prod_date: &DateTime<Utc>) -> i32 {
    prod_date.with_timezone(&Local).year()
}

/// Closed set of ship classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipType {
    Transport,
    Military,
    Merchant,
}

impl ShipType {
    pub const ALL: [ShipType; 3] = [ShipType::Transport, ShipType::Military, ShipType::Merchant];

    pub fn as_str(self) -> &'static str {
        match self {
            ShipType::Transport => "TRANSPORT",
            ShipType::Military => "MILITARY",
            ShipType::Merchant => "MERCHANT",
        }
    }
}

impl fmt::Display for ShipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownShipType {
                name: s.to_string(),
            })
    }
}

/// Sort keys accepted by the query pipeline. Sorting is always ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShipOrder {
    #[default]
    Id,
    Speed,
    Date,
    Rating,
}

impl ShipOrder {
    pub const ALL: [ShipOrder; 4] = [
        ShipOrder::Id,
        ShipOrder::Speed,
        ShipOrder::Date,
        ShipOrder::Rating,
    ];

    /// Name of the ship field this order sorts by, as it appears on the wire.
    pub fn field_name(self) -> &'static str {
        match self {
            ShipOrder::Id => "id",
            ShipOrder::Speed => "speed",
            ShipOrder::Date => "prodDate",
            ShipOrder::Rating => "rating",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ShipOrder::Id => "ID",
            ShipOrder::Speed => "SPEED",
            ShipOrder::Date => "DATE",
            ShipOrder::Rating => "RATING",
        }
    }
}

impl fmt::Display for ShipOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownShipOrder {
                name: s.to_string(),
            })
    }
}

/// A ship as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ship {
    pub id: ShipId,
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    /// Production date, serialized as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub prod_date: DateTime<Utc>,
    pub is_used: bool,
    /// Always stored rounded to two decimals.
    pub speed: f64,
    pub crew_size: i32,
    /// Derived from `speed`, `is_used` and `prod_date`.
    pub rating: f64,
}

/// A fully computed ship that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShip {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: DateTime<Utc>,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

impl NewShip {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: ShipId) -> Ship {
        Ship {
            id,
            name: self.name,
            planet: self.planet,
            ship_type: self.ship_type,
            prod_date: self.prod_date,
            is_used: self.is_used,
            speed: self.speed,
            crew_size: self.crew_size,
            rating: self.rating,
        }
    }
}

/// Input to `create`. Fields are assumed to be range-checked already.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipDraft {
    pub name: String,
    pub planet: String,
    pub ship_type: ShipType,
    pub prod_date: DateTime<Utc>,
    /// Defaults to `false` when omitted.
    pub is_used: Option<bool>,
    pub speed: f64,
    pub crew_size: i32,
}

/// Input to `update`: every present field overwrites the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipPatch {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    pub prod_date: Option<DateTime<Utc>>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

impl ShipPatch {
    pub fn is_empty(&self) -> bool {
        self == &ShipPatch::default()
    }

    /// Overwrite the fields of `ship` that are present in this patch.
    ///
    /// Leaves `rating` untouched; the caller recomputes it from the merged record.
    pub fn merge_into(self, ship: &mut Ship) {
        if let Some(name) = self.name {
            ship.name = name;
        }
        if let Some(planet) = self.planet {
            ship.planet = planet;
        }
        if let Some(ship_type) = self.ship_type {
            ship.ship_type = ship_type;
        }
        if let Some(prod_date) = self.prod_date {
            ship.prod_date = prod_date;
        }
        if let Some(is_used) = self.is_used {
            ship.is_used = is_used;
        }
        if let Some(speed) = self.speed {
            ship.speed = speed;
        }
        if let Some(crew_size) = self.crew_size {
            ship.crew_size = crew_size;
        }
    }
}
