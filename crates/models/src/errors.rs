use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid object id: {0}")]
    InvalidObjectId(String),
    #[error("decode error: {0}")]
    Decode(String),
}
