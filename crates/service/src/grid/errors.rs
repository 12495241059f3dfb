use thiserror::Error;

use crate::errors::ServiceError;

pub const INVALID_ID_MESSAGE: &str = "The requested grid id wasn't a legal Mongo Object ID";
pub const NOT_FOUND_MESSAGE: &str = "The requested grid was not found";

/// Failures surfaced by grid operations.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("The requested grid id wasn't a legal Mongo Object ID")]
    InvalidIdentifier,
    #[error("The requested grid was not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] ServiceError),
}

impl GridError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            GridError::InvalidIdentifier => 2001,
            GridError::NotFound => 2002,
            GridError::Validation(_) => 2003,
            GridError::Store(_) => 2100,
        }
    }
}
