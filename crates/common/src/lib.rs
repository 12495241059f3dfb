//! Shared plumbing for the grid server crates: logging setup, startup
//! environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
