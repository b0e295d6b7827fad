#![forbid(unsafe_code)]

//! Binds OpenAPI operations to handler resources.
//!
//! Each operation names its handler through `operationId`
//! (`module.Class.responder`) or the `x-falcon` extension; operations naming
//! neither are left unrouted. Handlers come from a [`HandlerRegistry`]
//! instead of being loaded from disk.

pub mod destination;
pub mod error;
pub mod registry;
pub mod resource;
pub mod router;

#[doc(hidden)]
pub use inventory;

pub use crate::destination::{resolve_destination, Destination};
pub use crate::error::RouterError;
pub use crate::registry::{default_factory, HandlerRegistry, ResourceFactory, ResourceRegistration};
pub use crate::resource::{responder, Resource, Responder, Response};
pub use crate::router::{plan_routes, MethodMap, OpenApiRouter, PlannedRoute, Route, RoutePlan, RouteTable, SkippedOperation};
