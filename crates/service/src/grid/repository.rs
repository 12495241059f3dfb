use async_trait::async_trait;
use models::{Grid, ObjectId};

use crate::errors::ServiceError;

/// Selects documents in the `grids` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridFilter {
    All,
    Id(ObjectId),
    RoomId(String),
}

impl GridFilter {
    pub fn matches(&self, grid: &Grid) -> bool {
        match self {
            GridFilter::All => true,
            GridFilter::Id(id) => grid.id == *id,
            GridFilter::RoomId(room) => grid.room_id == *room,
        }
    }
}

/// Document store capability backing the grid collection.
///
/// Single-document inserts and deletes must be atomic: of two concurrent
/// `delete_one` calls for the same id, at most one reports a removal.
#[async_trait]
pub trait GridCollection: Send + Sync {
    /// Point-in-time snapshot of matching documents in store order.
    async fn find(&self, filter: &GridFilter) -> Result<Vec<Grid>, ServiceError>;

    /// Insert a document; fails if its id is already present.
    async fn insert_one(&self, grid: Grid) -> Result<(), ServiceError>;

    /// Remove at most one matching document; returns how many were removed.
    async fn delete_one(&self, filter: &GridFilter) -> Result<u64, ServiceError>;

    async fn count(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        Ok(self.find(filter).await?.len() as u64)
    }
}
