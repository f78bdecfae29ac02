//! Catalog service: the only writer of ships.
//!
//! Every write goes through [`ShipCatalog`], which rounds the speed, recomputes
//! the rating and persists the result. Mutations are serialized by a single
//! writer lock so the load-merge-persist sequence of [`ShipCatalog::update`]
//! cannot interleave with another write.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::Result;
use crate::query::{self, PageRequest, ShipFilter};
use crate::rating::{calculate_rating, rating_for, round2};
use crate::ship::{NewShip, Ship, ShipDraft, ShipId, ShipPatch};
use crate::store::{InMemoryShipStore, ShipStore};

/// Orchestrates ship CRUD and queries on top of a [`ShipStore`].
pub struct ShipCatalog {
    store: Arc<dyn ShipStore>,
    writer: Mutex<()>,
}

impl ShipCatalog {
    pub fn new(store: Arc<dyn ShipStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    /// Catalog backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryShipStore::new()))
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn ShipStore> {
        &self.store
    }

    /// Create a ship from a validated draft and return it with its assigned id.
    pub fn create(&self, draft: ShipDraft) -> Result<Ship> {
        let speed = round2(draft.speed);
        let is_used = draft.is_used.unwrap_or(false);
        let ship = NewShip {
            rating: calculate_rating(speed, is_used, &draft.prod_date),
            name: draft.name,
            planet: draft.planet,
            ship_type: draft.ship_type,
            prod_date: draft.prod_date,
            is_used,
            speed,
            crew_size: draft.crew_size,
        };

        let _writer = self.writer.lock()?;
        let ship = self.store.insert(ship)?;
        info!(id = ship.id, rating = ship.rating, "created ship");
        Ok(ship)
    }

    /// Fetch a ship; `None` if the id is unknown.
    pub fn read(&self, id: ShipId) -> Result<Option<Ship>> {
        self.store.get(id)
    }

    /// Every ship in store order (ascending id).
    pub fn list(&self) -> Result<Vec<Ship>> {
        self.store.get_all()
    }

    /// Ships matching `filter`, unsorted and unpaginated.
    pub fn query(&self, filter: &ShipFilter) -> Result<Vec<Ship>> {
        let ships = query::filter_ships(self.store.get_all()?, filter);
        debug!(
            criteria = filter.criteria_count(),
            matched = ships.len(),
            "filtered ships"
        );
        Ok(ships)
    }

    /// Sort `ships` and return the requested page.
    pub fn page(&self, ships: Vec<Ship>, request: &PageRequest) -> Vec<Ship> {
        query::page(ships, request)
    }

    /// Size of the filtered set, independent of any page parameters.
    pub fn count(&self, filter: &ShipFilter) -> Result<usize> {
        Ok(self.query(filter)?.len())
    }

    /// Number of stored ships.
    pub fn len(&self) -> Result<usize> {
        self.store.len()
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.store.is_empty()
    }

    /// Merge `patch` into the stored ship and recompute its rating.
    ///
    /// Returns `None`, leaving the store untouched, if the id is unknown.
    pub fn update(&self, id: ShipId, patch: ShipPatch) -> Result<Option<Ship>> {
        let _writer = self.writer.lock()?;
        let Some(mut ship) = self.store.get(id)? else {
            return Ok(None);
        };

        patch.merge_into(&mut ship);
        ship.speed = round2(ship.speed);
        ship.rating = rating_for(&ship);

        if !self.store.replace(&ship)? {
            return Ok(None);
        }
        info!(id, rating = ship.rating, "updated ship");
        Ok(Some(ship))
    }

    /// Remove a ship. Returns `false` without side effects if the id is unknown.
    pub fn delete(&self, id: ShipId) -> Result<bool> {
        let _writer = self.writer.lock()?;
        let removed = self.store.delete(id)?;
        if removed {
            info!(id, "deleted ship");
        }
        Ok(removed)
    }
}

impl Default for ShipCatalog {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for ShipCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShipCatalog")
            .field("ships", &self.store.len().ok())
            .finish()
    }
}
