//! In-memory car store.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::domain::{Car, CarFields, CarId};
use crate::observability::metrics;
use crate::store::{CarStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
struct Slot {
    /// Insertion sequence, used to keep listings stable.
    seq: u64,
    car: Car,
}

/// A thread-safe, process-local car collection.
///
/// Cloning shares the underlying map, so one instance can be handed to the
/// service and inspected by tests at the same time.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<CarId, Slot>>,
    next_seq: Arc<AtomicU64>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `cars`.
    ///
    /// Later entries with an id already seen replace the earlier ones;
    /// config validation rejects such seeds before they get here.
    pub fn with_seed(cars: impl IntoIterator<Item = Car>) -> Self {
        let store = Self::new();
        for car in cars {
            store.put(car);
        }
        tracing::info!(cars = store.inner.len(), "Seeded car store");
        store
    }

    fn put(&self, car: Car) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.inner.insert(car.id.clone(), Slot { seq, car });
        metrics::record_store_size(self.inner.len());
    }
}

impl CarStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Car>> {
        let mut slots: Vec<Slot> = self.inner.iter().map(|r| r.value().clone()).collect();
        slots.sort_by_key(|slot| slot.seq);
        Ok(slots.into_iter().map(|slot| slot.car).collect())
    }

    fn get(&self, id: &str) -> StoreResult<Option<Car>> {
        Ok(self.inner.get(id).map(|r| r.value().car.clone()))
    }

    fn insert(&self, car: Car) -> StoreResult<()> {
        self.put(car);
        Ok(())
    }

    fn update(&self, id: &str, fields: CarFields) -> StoreResult<()> {
        match self.inner.get_mut(id) {
            Some(mut slot) => {
                slot.car.apply(fields);
                Ok(())
            }
            None => Err(StoreError::Missing(id.to_string())),
        }
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        let removed = self.inner.remove(id);
        metrics::record_store_size(self.inner.len());
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::Missing(id.to_string())),
        }
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.inner.len())
    }
}
