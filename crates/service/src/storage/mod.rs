//! Storage abstractions for service layer
//!
//! File-backed document collections persisted as JSON.

pub mod json_collection_file;

pub use json_collection_file::JsonCollectionFile;
