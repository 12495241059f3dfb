//! Grid persistence and request handling.
//!
//! Layers: `repository` (store capability), `store` (id validation and
//! collection queries), `service` (request-shaped operations).

pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod store;

pub use errors::GridError;
pub use repository::{GridCollection, GridFilter};
pub use service::{GridResponse, GridService};
pub use store::GridStore;
