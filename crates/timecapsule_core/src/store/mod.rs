//! Storage layer contract and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection persistence contract used by the service.
//! - Isolate file-format and I/O details from business orchestration.
//!
//! # Invariants
//! - An absent or blank backing resource reads as an empty collection.
//! - Undecodable persisted content is surfaced as `StoreError::Corrupt`,
//!   never masked as an empty collection.
//! - `save_all` replaces the whole document or leaves the previous one
//!   intact; partial writes are never visible at the target path.

use crate::model::capsule::Capsule;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_file;

pub use json_file::JsonFileStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by store load/save operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing resource unreadable or unwritable.
    Io(std::io::Error),
    /// Backing resource exists but holds undecodable content.
    Corrupt(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store i/o failure: {err}"),
            Self::Corrupt(err) => write!(f, "store content is corrupt: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Whole-collection persistence contract for capsules.
///
/// The collection carries no ordering invariant at rest; ordering is a
/// presentation-time computation owned by the service layer.
pub trait CapsuleStore {
    /// Reads the full persisted collection.
    fn load_all(&self) -> StoreResult<Vec<Capsule>>;
    /// Atomically replaces the full persisted collection.
    fn save_all(&self, capsules: &[Capsule]) -> StoreResult<()>;
}
