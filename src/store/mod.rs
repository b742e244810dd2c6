//! Car storage.
//!
//! # Data Flow
//! ```text
//! CarService (validated request)
//!     → CarStore trait (single call per request)
//!     → memory.rs (DashMap keyed by id)
//! ```
//!
//! # Design Decisions
//! - The store is a leaf: it knows nothing about requests or status codes
//! - Callers pre-check existence and uniqueness; the store does not
//! - Every call is atomic on its own; multi-call sequences are the
//!   caller's critical section

pub mod memory;

use thiserror::Error;

use crate::domain::{Car, CarFields};

pub use memory::MemoryStore;

/// Errors a store backend can report.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed record was not present when the write was applied.
    #[error("car {0} is not present in the store")]
    Missing(String),

    /// The backend could not serve the call.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-based car collection consumed by the service.
pub trait CarStore: Send + Sync {
    /// All records, in insertion order.
    fn list(&self) -> StoreResult<Vec<Car>>;

    /// Look up one record. Absence is `Ok(None)`, not an error.
    fn get(&self, id: &str) -> StoreResult<Option<Car>>;

    /// Add a record whose id the caller has checked to be unused.
    fn insert(&self, car: Car) -> StoreResult<()>;

    /// Replace the mutable fields of an existing record.
    fn update(&self, id: &str, fields: CarFields) -> StoreResult<()>;

    /// Remove an existing record.
    fn delete(&self, id: &str) -> StoreResult<()>;

    /// Number of stored records.
    fn count(&self) -> StoreResult<usize> {
        self.list().map(|cars| cars.len())
    }

    fn contains(&self, id: &str) -> StoreResult<bool> {
        self.get(id).map(|car| car.is_some())
    }
}
