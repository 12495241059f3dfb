use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::{Grid, ObjectId};

use crate::errors::ServiceError;
use crate::grid::repository::{GridCollection, GridFilter};
use crate::storage::JsonCollectionFile;

/// Collection persisted to a single JSON file, ordered by id (and so by creation time).
#[derive(Clone)]
pub struct FileGridCollection {
    store: Arc<JsonCollectionFile<ObjectId, Grid>>,
}

impl FileGridCollection {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonCollectionFile::open(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl GridCollection for FileGridCollection {
    async fn find(&self, filter: &GridFilter) -> Result<Vec<Grid>, ServiceError> {
        match filter {
            GridFilter::Id(id) => Ok(self.store.get(id).await.into_iter().collect()),
            _ => Ok(self.store.filter(|g| filter.matches(g)).await),
        }
    }

    async fn insert_one(&self, grid: Grid) -> Result<(), ServiceError> {
        let id = grid.id;
        if !self.store.insert_new(id, grid).await? {
            return Err(ServiceError::duplicate_key(&id));
        }
        Ok(())
    }

    async fn delete_one(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
        let removed = self.store.remove_first(|g| filter.matches(g)).await?;
        Ok(removed.map_or(0, |_| 1))
    }
}
