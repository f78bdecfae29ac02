//! Query pipeline: predicate filtering, stable sorting and pagination.
//!
//! The three stages are separable so callers can count the filtered set
//! without paging it:
//!
//! ```text
//! snapshot ──filter──▶ filtered ──sort──▶ sorted ──paginate──▶ page
//!                          │
//!                          └──len──▶ count
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::ship::{Ship, ShipOrder, ShipType};

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE_NUMBER: u64 = 0;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u64 = 3;

/// Conjunction of optional ship predicates. An unset criterion matches every ship.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipFilter {
    /// Case-sensitive substring of the ship name.
    pub name: Option<String>,
    /// Case-sensitive substring of the planet.
    pub planet: Option<String>,
    pub ship_type: Option<ShipType>,
    /// Inclusive lower bound on the production date.
    pub after: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the production date.
    pub before: Option<DateTime<Utc>>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

impl ShipFilter {
    /// Filter that accepts every ship.
    pub fn all() -> Self {
        Self::default()
    }

    /// Number of criteria that are set.
    pub fn criteria_count(&self) -> usize {
        [
            self.name.is_some(),
            self.planet.is_some(),
            self.ship_type.is_some(),
            self.after.is_some(),
            self.before.is_some(),
            self.is_used.is_some(),
            self.min_speed.is_some(),
            self.max_speed.is_some(),
            self.min_crew_size.is_some(),
            self.max_crew_size.is_some(),
            self.min_rating.is_some(),
            self.max_rating.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Whether `ship` satisfies every set criterion.
    pub fn matches(&self, ship: &Ship) -> bool {
        self.name
            .as_deref()
            .is_none_or(|name| ship.name.contains(name))
            && self
                .planet
                .as_deref()
                .is_none_or(|planet| ship.planet.contains(planet))
            && self.ship_type.is_none_or(|ty| ship.ship_type == ty)
            && self.after.is_none_or(|after| ship.prod_date >= after)
            && self.before.is_none_or(|before| ship.prod_date <= before)
            && self.is_used.is_none_or(|used| ship.is_used == used)
            && self.min_speed.is_none_or(|min| ship.speed >= min)
            && self.max_speed.is_none_or(|max| ship.speed <= max)
            && self.min_crew_size.is_none_or(|min| ship.crew_size >= min)
            && self.max_crew_size.is_none_or(|max| ship.crew_size <= max)
            && self.min_rating.is_none_or(|min| ship.rating >= min)
            && self.max_rating.is_none_or(|max| ship.rating <= max)
    }
}

/// Which page of the sorted sequence to return, and how to sort it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: u64,
    pub page_size: u64,
    pub order: ShipOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            order: ShipOrder::default(),
        }
    }
}

impl PageRequest {
    pub fn new(page_number: u64, page_size: u64, order: ShipOrder) -> Self {
        Self {
            page_number,
            page_size,
            order,
        }
    }

    /// Index of the first element of the page, or `None` if it does not fit in `usize`.
    pub fn offset(&self) -> Option<usize> {
        offset(self.page_number, self.page_size)
    }
}

impl ShipOrder {
    /// Ascending comparator for this sort key.
    pub fn comparator(self) -> fn(&Ship, &Ship) -> Ordering {
        match self {
            ShipOrder::Id => |a: &Ship, b: &Ship| a.id.cmp(&b.id),
            ShipOrder::Speed => |a: &Ship, b: &Ship| a.speed.total_cmp(&b.speed),
            ShipOrder::Date => |a: &Ship, b: &Ship| a.prod_date.cmp(&b.prod_date),
            ShipOrder::Rating => |a: &Ship, b: &Ship| a.rating.total_cmp(&b.rating),
        }
    }
}

/// Keep the ships matching `filter`, preserving input order.
pub fn filter_ships<I>(ships: I, filter: &ShipFilter) -> Vec<Ship>
where
    I: IntoIterator<Item = Ship>,
{
    ships.into_iter().filter(|ship| filter.matches(ship)).collect()
}

/// Stable ascending sort; ships with equal keys keep their relative order.
pub fn sort_ships(ships: &mut [Ship], order: ShipOrder) {
    ships.sort_by(order.comparator());
}

/// Index of the first ship on a page, or `None` if it does not fit in `usize`.
fn offset(page_number: u64, page_size: u64) -> Option<usize> {
    page_number
        .checked_mul(page_size)
        .and_then(|offset| usize::try_from(offset).ok())
}

/// Slice out one page. Pages past the end, and offsets that overflow, are empty.
pub fn paginate(ships: Vec<Ship>, page_number: u64, page_size: u64) -> Vec<Ship> {
    let Some(offset) = offset(page_number, page_size) else {
        return Vec::new();
    };
    if offset >= ships.len() {
        return Vec::new();
    }
    let size = usize::try_from(page_size).unwrap_or(usize::MAX);
    ships.into_iter().skip(offset).take(size).collect()
}

/// Sort then paginate according to `request`.
pub fn page(mut ships: Vec<Ship>, request: &PageRequest) -> Vec<Ship> {
    sort_ships(&mut ships, request.order);
    paginate(ships, request.page_number, request.page_size)
}
