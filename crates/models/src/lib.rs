//! Grid domain types, identifiers and the `grids` table entity.

pub mod errors;
pub mod db;
pub mod object_id;
pub mod grid;
pub mod grid_record;

pub use grid::{Grid, GridCell, GridCells, NewGrid};
pub use object_id::ObjectId;
