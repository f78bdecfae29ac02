//! Shipyard library entry points.
//!
//! This crate holds the ship entity model, the rating formula, the
//! filter/sort/page query pipeline, the keyed stores and the catalog service
//! that ties them together. Higher-level consumers (the HTTP service) should
//! only depend on the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod query;
pub mod rating;
pub mod ship;
pub mod store;

pub use catalog::ShipCatalog;
pub use error::{Error, Result};
pub use query::{filter_ships, page, paginate, sort_ships, PageRequest, ShipFilter};
pub use rating::{calculate_rating, rating_for, round2};
pub use ship::{NewShip, Ship, ShipDraft, ShipId, ShipOrder, ShipPatch, ShipType};
pub use store::{InMemoryShipStore, ShipStore, SqliteShipStore};
