//! `GridCollection` backends.

pub mod memory;
pub mod file;
pub mod seaorm;

pub use file::FileGridCollection;
pub use memory::MemoryGridCollection;
pub use seaorm::SeaOrmGridCollection;
