//! The car service: validated operations over an owned store.

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Car, CarFields, CarId};
use crate::http::response;
use crate::routing::Operation;
use crate::store::CarStore;
use crate::validation::{CREATE_SCHEMA, UPDATE_SCHEMA};

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Listed(Vec<Car>),
    Found(Car),
    /// Create, update and delete all answer 202 with no body.
    Accepted,
}

impl Outcome {
    pub fn status(&self) -> StatusCode {
        match self {
            Outcome::Listed(_) | Outcome::Found(_) => StatusCode::OK,
            Outcome::Accepted => StatusCode::ACCEPTED,
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Listed(cars) => response::json(StatusCode::OK, &cars),
            Outcome::Found(car) => response::json(StatusCode::OK, &car),
            Outcome::Accepted => response::empty(StatusCode::ACCEPTED),
        }
    }
}

/// Validates requests and applies them to the store.
///
/// Owns its store handle, so tests get isolation by building a fresh
/// service around a fresh store.
pub struct CarService {
    store: Arc<dyn CarStore>,
    /// Serializes check-then-act sequences (uniqueness, existence).
    write_gate: Mutex<()>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// Run one operation to completion.
    ///
    /// `read_body` is only called by operations that take a body, and only
    /// once the checks that precede body inspection have passed.
    pub async fn handle<F, Fut>(&self, operation: &Operation, read_body: F) -> ApiResult<Outcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<Bytes>>,
    {
        match operation {
            Operation::ListCars => self.list().map(Outcome::Listed),
            Operation::GetCar(id) => self.fetch(id).map(Outcome::Found),
            Operation::CreateCar => {
                let body = read_body().await?;
                self.create(&body).await?;
                Ok(Outcome::Accepted)
            }
            Operation::UpdateCar(id) => {
                // Existence is decided from the path alone.
                self.ensure_exists(id)?;
                let body = read_body().await?;
                self.update(id, &body).await?;
                Ok(Outcome::Accepted)
            }
            Operation::DeleteCar(id) => {
                self.delete(id).await?;
                Ok(Outcome::Accepted)
            }
        }
    }

    pub fn list(&self) -> ApiResult<Vec<Car>> {
        Ok(self.store.list()?)
    }

    pub fn fetch(&self, id: &str) -> ApiResult<Car> {
        self.store
            .get(id)?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    fn ensure_exists(&self, id: &str) -> ApiResult<()> {
        if self.store.contains(id)? {
            Ok(())
        } else {
            Err(ApiError::NotFound(id.to_string()))
        }
    }

    /// Validate a create body and insert it if the id is unused.
    pub async fn create(&self, body: &[u8]) -> ApiResult<CarId> {
        let car: Car = CREATE_SCHEMA.extract(body)?;

        let _gate = self.write_gate.lock().await;
        if self.store.contains(&car.id)? {
            return Err(ApiError::Conflict(car.id));
        }
        let id = car.id.clone();
        self.store.insert(car)?;
        Ok(id)
    }

    /// Validate an update body and apply it to an existing car.
    pub async fn update(&self, id: &str, body: &[u8]) -> ApiResult<()> {
        let fields: CarFields = UPDATE_SCHEMA.extract(body)?;

        let _gate = self.write_gate.lock().await;
        // Re-checked: the car may have been deleted while the body was read.
        self.ensure_exists(id)?;
        self.store.update(id, fields)?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let _gate = self.write_gate.lock().await;
        self.ensure_exists(id)?;
        self.store.delete(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use serde_json::Number;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn car(id: &str) -> Car {
        Car {
            id: id.into(),
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2008,
            price: Number::from(4500),
        }
    }

    fn service_with(ids: &[&str]) -> (CarService, MemoryStore) {
        let store = MemoryStore::with_seed(ids.iter().map(|id| car(id)));
        (CarService::new(Arc::new(store.clone())), store)
    }

    async fn run(service: &CarService, op: Operation, body: &'static [u8]) -> ApiResult<Outcome> {
        service
            .handle(&op, || async move { Ok(Bytes::from_static(body)) })
            .await
    }

    const Z4: &[u8] = br#"{"id":"24","make":"BMW","model":"Z4","year":2005,"price":9300}"#;
    const SKYLINE: &[u8] = br#"{"make":"Nissan","model":"Skyline","year":1999,"price":2200}"#;

    #[tokio::test]
    async fn test_create_then_fetch() {
        let (service, _) = service_with(&[]);
        assert_eq!(run(&service, Operation::CreateCar, Z4).await.unwrap(), Outcome::Accepted);

        let fetched = run(&service, Operation::GetCar("24".into()), b"").await.unwrap();
        let Outcome::Found(car) = fetched else { panic!("expected a car") };
        assert_eq!(car.make, "BMW");
        assert_eq!(car.price, Number::from(9300));
    }

    #[tokio::test]
    async fn test_duplicate_create_conflicts() {
        let (service, store) = service_with(&[]);
        run(&service, Operation::CreateCar, Z4).await.unwrap();
        let err = run(&service, Operation::CreateCar, Z4).await.unwrap_err();
        assert!(matches!(err, ApiError::Conflict(ref id) if id == "24"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_shape_checked_before_uniqueness() {
        let (service, _) = service_with(&["24"]);
        let body = br#"{"id":"24","make":"BMW"}"#;
        let err = run(&service, Operation::CreateCar, body).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rejections_are_repeatable() {
        let (service, store) = service_with(&["1"]);
        for _ in 0..3 {
            let err = run(&service, Operation::CreateCar, br#"{"id":"2"}"#).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
            let err = run(&service, Operation::UpdateCar("1".into()), b"").await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(store.list().unwrap(), vec![car("1")]);
    }

    #[tokio::test]
    async fn test_update_missing_car_never_reads_body() {
        let (service, _) = service_with(&[]);
        let read = AtomicBool::new(false);
        let flag = &read;
        let err = service
            .handle(&Operation::UpdateCar("9001".into()), move || async move {
                flag.store(true, Ordering::SeqCst);
                Ok(Bytes::from_static(b"not json"))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(!read.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let (service, store) = service_with(&["1"]);
        let outcome = run(&service, Operation::UpdateCar("1".into()), SKYLINE).await.unwrap();
        assert_eq!(outcome, Outcome::Accepted);
        let updated = store.get("1").unwrap().unwrap();
        assert_eq!(updated.id, "1");
        assert_eq!(updated.model, "Skyline");
    }

    #[tokio::test]
    async fn test_update_rejects_id_in_body() {
        let (service, _) = service_with(&["1"]);
        let body = br#"{"id":"1","make":"Nissan","model":"Skyline","year":1999,"price":2200}"#;
        let err = run(&service, Operation::UpdateCar("1".into()), body).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_then_fetch() {
        let (service, _) = service_with(&["1", "2", "3"]);
        run(&service, Operation::DeleteCar("3".into()), b"").await.unwrap();
        let err = run(&service, Operation::GetCar("3".into()), b"").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        let err = run(&service, Operation::DeleteCar("3".into()), b"").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_creates_admit_one() {
        let (service, store) = service_with(&[]);
        let service = Arc::new(service);
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let service = service.clone();
            tasks.push(tokio::spawn(async move { service.create(Z4).await }));
        }
        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.count().unwrap(), 1);
    }

    struct BrokenStore;

    impl CarStore for BrokenStore {
        fn list(&self) -> StoreResult<Vec<Car>> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
        fn get(&self, _id: &str) -> StoreResult<Option<Car>> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
        fn insert(&self, _car: Car) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
        fn update(&self, _id: &str, _fields: CarFields) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
        fn delete(&self, _id: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_server_errors() {
        let service = CarService::new(Arc::new(BrokenStore));
        let err = run(&service, Operation::ListCars, b"").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Validation still runs first.
        let err = run(&service, Operation::CreateCar, b"{").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
