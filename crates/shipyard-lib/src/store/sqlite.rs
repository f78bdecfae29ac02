use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::DateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

use crate::error::Result;
use crate::ship::{NewShip, Ship, ShipId, ShipType};

use super::ShipStore;

// AUTOINCREMENT keeps SQLite from handing out the rowid of a deleted ship again.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS ships (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    name      TEXT    NOT NULL,
    planet    TEXT    NOT NULL,
    ship_type TEXT    NOT NULL,
    prod_date INTEGER NOT NULL,
    is_used   INTEGER NOT NULL,
    speed     REAL    NOT NULL,
    crew_size INTEGER NOT NULL,
    rating    REAL    NOT NULL
);
";

const SELECT_COLUMNS: &str =
    "id, name, planet, ship_type, prod_date, is_used, speed, crew_size, rating";

/// Ship store backed by a single SQLite database.
#[derive(Debug)]
pub struct SqliteShipStore {
    connection: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteShipStore {
    /// Open (creating if needed) the database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let connection = Connection::open(db_path)?;
        let store = Self::from_connection(connection, Some(db_path.to_path_buf()))?;
        info!(path = %db_path.display(), "opened ship database");
        Ok(store)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?, None)
    }

    fn from_connection(connection: Connection, path: Option<PathBuf>) -> Result<Self> {
        connection.execute_batch(SCHEMA)?;
        Ok(Self {
            connection: Mutex::new(connection),
            path,
        })
    }

    /// Location of the database file, if not in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ShipStore for SqliteShipStore {
    fn get(&self, id: ShipId) -> Result<Option<Ship>> {
        let connection = self.connection.lock()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM ships WHERE id = ?1");
        let ship = connection
            .query_row(&sql, params![id], row_to_ship)
            .optional()?;
        Ok(ship)
    }

    fn insert(&self, ship: NewShip) -> Result<Ship> {
        let connection = self.connection.lock()?;
        connection.execute(
            "INSERT INTO ships (name, planet, ship_type, prod_date, is_used, speed, crew_size, rating)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                ship.name,
                ship.planet,
                ship.ship_type.as_str(),
                ship.prod_date.timestamp_millis(),
                ship.is_used,
                ship.speed,
                ship.crew_size,
                ship.rating,
            ],
        )?;
        let id = connection.last_insert_rowid();
        debug!(id, "inserted ship row");
        Ok(ship.with_id(id))
    }

    fn replace(&self, ship: &Ship) -> Result<bool> {
        let connection = self.connection.lock()?;
        let changed = connection.execute(
            "UPDATE ships
             SET name = ?2, planet = ?3, ship_type = ?4, prod_date = ?5,
                 is_used = ?6, speed = ?7, crew_size = ?8, rating = ?9
             WHERE id = ?1",
            params![
                ship.id,
                ship.name,
                ship.planet,
                ship.ship_type.as_str(),
                ship.prod_date.timestamp_millis(),
                ship.is_used,
                ship.speed,
                ship.crew_size,
                ship.rating,
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: ShipId) -> Result<bool> {
        let connection = self.connection.lock()?;
        let removed = connection.execute("DELETE FROM ships WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }

    fn get_all(&self) -> Result<Vec<Ship>> {
        let connection = self.connection.lock()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM ships ORDER BY id");
        let mut stmt = connection.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_ship)?;

        let mut ships = Vec::new();
        for entry in rows {
            ships.push(entry?);
        }
        Ok(ships)
    }

    fn exists(&self, id: ShipId) -> Result<bool> {
        let connection = self.connection.lock()?;
        let found = connection
            .query_row("SELECT 1 FROM ships WHERE id = ?1", params![id], |_| Ok(()))
            .optional()?;
        Ok(found.is_some())
    }

    fn len(&self) -> Result<usize> {
        let connection = self.connection.lock()?;
        let count: i64 = connection.query_row("SELECT COUNT(*) FROM ships", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn row_to_ship(row: &Row<'_>) -> rusqlite::Result<Ship> {
    let ship_type: String = row.get(3)?;
    let ship_type = ship_type
        .parse::<ShipType>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(err)))?;

    let prod_millis: i64 = row.get(4)?;
    let prod_date = DateTime::from_timestamp_millis(prod_millis)
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(4, prod_millis))?;

    Ok(Ship {
        id: row.get(0)?,
        name: row.get(1)?,
        planet: row.get(2)?,
        ship_type,
        prod_date,
        is_used: row.get(5)?,
        speed: row.get(6)?,
        crew_size: row.get(7)?,
        rating: row.get(8)?,
    })
}
