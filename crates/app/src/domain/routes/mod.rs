//! Shipment Routes
//!
//! A route binds a set of pending shipments to a carrier. Creating a route
//! puts its shipments in transit; completing it delivers them.

pub mod data;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;

pub use errors::RoutesServiceError;
pub use service::*;
