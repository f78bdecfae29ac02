//! Keyed ship storage.
//!
//! The catalog talks to storage only through [`ShipStore`]. Two backends are
//! provided: [`InMemoryShipStore`] for tests and ephemeral deployments, and
//! [`SqliteShipStore`] for a persistent single-file catalog.
//!
//! Both backends hand out ids from a monotonically increasing sequence, so an
//! id freed by `delete` is never assigned again.

mod memory;
mod sqlite;

pub use memory::InMemoryShipStore;
pub use sqlite::SqliteShipStore;

use crate::error::Result;
use crate::ship::{NewShip, Ship, ShipId};

/// Keyed store collaborator of the catalog.
///
/// Every method is atomic on its own. Callers that need a read-modify-write
/// sequence must serialize it themselves; the catalog does so with its writer lock.
pub trait ShipStore: Send + Sync {
    /// Fetch a ship by id.
    fn get(&self, id: ShipId) -> Result<Option<Ship>>;

    /// Persist a new ship, assigning the next unused id.
    fn insert(&self, ship: NewShip) -> Result<Ship>;

    /// Overwrite an existing ship. Returns `false` if no ship has that id.
    fn replace(&self, ship: &Ship) -> Result<bool>;

    /// Remove a ship. Returns `false` if no ship has that id.
    fn delete(&self, id: ShipId) -> Result<bool>;

    /// Consistent snapshot of every stored ship, ascending by id.
    fn get_all(&self) -> Result<Vec<Ship>>;

    fn exists(&self, id: ShipId) -> Result<bool> {
        Ok(self.get(id)?.is_some())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.get_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
