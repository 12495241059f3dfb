//! Service layer for grid documents.
//! - `grid::GridStore` validates identifiers and talks to a `GridCollection`.
//! - `grid::GridService` exposes request-shaped operations and the error taxonomy.
//! - Collection backends: in-memory, JSON file, Postgres (SeaORM).

pub mod errors;
pub mod grid;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
