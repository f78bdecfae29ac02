use thiserror::Error;

use crate::ship::ShipId;

/// Convenient result alias for the Shipyard library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// A missing ship is not an error: lookups return `Option` and deletes return
/// `bool`. The variants below cover failures of the backing store itself.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a ship type name does not match any known variant.
    #[error("unknown ship type: {name}")]
    UnknownShipType { name: String },

    /// Raised when a sort order name does not match any known variant.
    #[error("unknown ship order: {name}")]
    UnknownShipOrder { name: String },

    /// The store ran out of identifiers.
    #[error("ship id space exhausted after {last}")]
    IdExhausted { last: ShipId },

    /// A lock guarding store or catalog state was poisoned by a panicking writer.
    #[error("ship store lock poisoned")]
    StorePoisoned,

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::StorePoisoned
    }
}
