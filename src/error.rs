use crate::domain::item::ItemId;
use crate::domain::patron::PatronId;
use thiserror::Error;

/// A circulation request the library refused.
///
/// These are expected outcomes of ordinary traffic, not faults. The `Display`
/// text is what gets reported back for each rejected command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    #[error("patron not found")]
    PatronNotFound,
    #[error("item not found")]
    ItemNotFound,
    #[error("item already checked out")]
    AlreadyCheckedOut,
    #[error("item on hold by other patron")]
    OnHoldByOtherPatron,
    #[error("item already in library")]
    NotCheckedOut,
    #[error("item already on hold")]
    AlreadyOnHold,
    #[error("simulation clock cannot advance past day {}", crate::domain::item::Day::MAX)]
    ClockExhausted,
    /// The item's holder and the patron's checked-out set disagree.
    #[error("item {item} is not held by patron {patron}")]
    HolderMismatch { item: ItemId, patron: PatronId },
}

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Catalog error: {0}")]
    CatalogError(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Rejected: {0}")]
    Circulation(#[from] CirculationError),
    #[error("Library service is no longer running")]
    ServiceUnavailable,
}

pub type Result<T> = std::result::Result<T, LibraryError>;
