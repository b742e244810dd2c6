//! Operation table.
//!
//! # Responsibilities
//! - Map (method, target) to exactly one operation or a syntax error
//! - Extract the resource id for item operations
//!
//! # Design Decisions
//! - The table is a fixed, ordered list; first match wins
//! - Target syntax is checked before the method/shape lookup, so a bad
//!   target is always a syntax error whatever the method
//! - Methods outside the table are syntax errors, not 405

use axum::http::Method;
use thiserror::Error;

use crate::domain::CarId;
use crate::routing::target::{parse_target, Shape, Target, TargetError};

/// Methods the service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Verb::Get),
            Method::POST => Some(Verb::Post),
            Method::PUT => Some(Verb::Put),
            Method::DELETE => Some(Verb::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationKind {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// A resolved request: what to do and, for item routes, to which car.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListCars,
    GetCar(CarId),
    CreateCar,
    UpdateCar(CarId),
    DeleteCar(CarId),
}

impl Operation {
    /// Stable label for logs and metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListCars => "list_cars",
            Operation::GetCar(_) => "get_car",
            Operation::CreateCar => "create_car",
            Operation::UpdateCar(_) => "update_car",
            Operation::DeleteCar(_) => "delete_car",
        }
    }

    /// The addressed car, for item operations.
    pub fn car_id(&self) -> Option<&str> {
        match self {
            Operation::GetCar(id) | Operation::UpdateCar(id) | Operation::DeleteCar(id) => Some(id),
            Operation::ListCars | Operation::CreateCar => None,
        }
    }
}

struct Route {
    verb: Verb,
    shape: Shape,
    kind: OperationKind,
}

const ROUTES: &[Route] = &[
    Route { verb: Verb::Get, shape: Shape::Collection, kind: OperationKind::List },
    Route { verb: Verb::Get, shape: Shape::Item, kind: OperationKind::Get },
    Route { verb: Verb::Post, shape: Shape::Collection, kind: OperationKind::Create },
    Route { verb: Verb::Put, shape: Shape::Item, kind: OperationKind::Update },
    Route { verb: Verb::Delete, shape: Shape::Item, kind: OperationKind::Delete },
];

/// Why a request could not be routed. Every variant is a syntax error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unsupported method {0}")]
    UnsupportedMethod(Method),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error("no {verb:?} route for {shape:?} target")]
    NoRoute { verb: Verb, shape: Shape },
}

/// Resolve a method and raw request target into an operation.
pub fn resolve(method: &Method, raw_target: &str) -> Result<Operation, RouteError> {
    let verb = Verb::from_method(method).ok_or_else(|| RouteError::UnsupportedMethod(method.clone()))?;
    let target = parse_target(raw_target)?;
    let shape = target.shape();

    let route = ROUTES
        .iter()
        .find(|route| route.verb == verb && route.shape == shape)
        .ok_or(RouteError::NoRoute { verb, shape })?;

    let operation = match (route.kind, target) {
        (OperationKind::List, _) => Operation::ListCars,
        (OperationKind::Create, _) => Operation::CreateCar,
        (OperationKind::Get, Target::Item(id)) => Operation::GetCar(id),
        (OperationKind::Update, Target::Item(id)) => Operation::UpdateCar(id),
        (OperationKind::Delete, Target::Item(id)) => Operation::DeleteCar(id),
        // Item kinds are only listed against the item shape.
        (_, Target::Collection) => return Err(RouteError::NoRoute { verb, shape }),
    };

    Ok(operation)
}
