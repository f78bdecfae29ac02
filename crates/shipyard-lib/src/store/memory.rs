use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::{Error, Result};
use crate::ship::{NewShip, Ship, ShipId};

use super::ShipStore;

#[derive(Debug, Default)]
struct Inner {
    ships: BTreeMap<ShipId, Ship>,
    last_id: ShipId,
}

/// Ship store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryShipStore {
    inner: RwLock<Inner>,
}

impl InMemoryShipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing ships, keeping their ids.
    ///
    /// The id sequence continues after the largest seeded id.
    pub fn with_ships(ships: impl IntoIterator<Item = Ship>) -> Self {
        let mut inner = Inner::default();
        for ship in ships {
            inner.last_id = inner.last_id.max(ship.id);
            inner.ships.insert(ship.id, ship);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

impl ShipStore for InMemoryShipStore {
    fn get(&self, id: ShipId) -> Result<Option<Ship>> {
        Ok(self.inner.read()?.ships.get(&id).cloned())
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let mut inner = self.inner.write()?;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or(Error::IdExhausted {
                last: inner.last_id,
            })?;
        inner.last_id = id;
        let ship = ship.with_id(id);
        inner.ships.insert(id, ship.clone());
        debug!(id, "inserted ship");
        Ok(ship)
    }

    fn replace(&self, ship: &Ship) -> Result<bool> {
        let mut inner = self.inner.write()?;
        match inner.ships.get_mut(&ship.id) {
            Some(slot) => {
                *slot = ship.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: ShipId) -> Result<bool> {
        Ok(self.inner.write()?.ships.remove(&id).is_some())
    }

    fn get_all(&self) -> Result<Vec<Ship>> {
        Ok(self.inner.read()?.ships.values().cloned().collect())
    }

    fn exists(&self, id: ShipId) -> Result<bool> {
        Ok(self.inner.read()?.ships.contains_key(&id))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.inner.read()?.ships.len())
    }
}
