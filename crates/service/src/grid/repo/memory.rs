use async_trait::async_trait;
use models::Grid;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::grid::repository::{GridCollection, GridFilter};

/// In-process collection kept in insertion order. Used by tests and the
/// `memory` backend; contents are lost on restart.
#[derive(Default)]
pub struct MemoryGridCollection {
    docs: RwLock<Vec<Grid>>,
}

impl MemoryGridCollection {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl GridCollection for MemoryGridCollection {
    async fn find(&self, filter: &GridFilter) -> Result<Vec<Grid>, ServiceError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().filter(|g| filter.matches(g)).cloned().collect())
    }

    async fn insert_one(&self, grid: Grid) -> Result<(), ServiceError> {
        let mut docs = self.docs.write().await;
        if docs.iter().any(|g| g.id == grid.id) {
            return Err(ServiceError::duplicate_key(&grid.id));
        }
        docs.push(grid);
        Ok(())
    }

    async fn delete_one(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        let mut docs = self.docs.write().await;
        match docs.iter().position(|g| filter.matches(g)) {
            Some(pos) => {
                docs.remove(pos);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn count(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().filter(|g| filter.matches(g)).count() as u64)
    }
}
