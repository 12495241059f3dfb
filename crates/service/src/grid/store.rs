use std::sync::Arc;

use models::{Grid, NewGrid, ObjectId};
use tracing::{debug, info, instrument};

use super::errors::GridError;
use super::repository::{GridCollection, GridFilter};

/// Maps grid ids and room keys onto the underlying collection.
///
/// Ids are validated here before any store call, so a malformed id
/// (`InvalidIdentifier`) is never confused with an absent one (`NotFound`).
pub struct GridStore<C: GridCollection + ?Sized> {
    collection: Arc<C>,
}

impl<C: GridCollection + ?Sized> Clone for GridStore<C> {
    fn clone(&self) -> Self { Self { collection: Arc::clone(&self.collection) } }
}

fn parse_id(id: &str) -> Result<ObjectId, GridError> {
    ObjectId::parse_str(id).map_err(|_| GridError::InvalidIdentifier)
}

impl<C: GridCollection + ?Sized> GridStore<C> {
    pub fn new(collection: Arc<C>) -> Self { Self { collection } }

    pub async fn list_all(&self) -> Result<Vec<Grid>, GridError> {
        Ok(self.collection.find(&GridFilter::All).await?)
    }

    pub async fn count(&self) -> Result<u64, GridError> {
        Ok(self.collection.count(&GridFilter::All).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Grid, GridError> {
        let oid = parse_id(id)?;
        self.collection
            .find(&GridFilter::Id(oid))
            .await?
            .into_iter()
            .next()
            .ok_or(GridError::NotFound)
    }

    pub async fn list_by_room(&self, room_id: &str) -> Result<Vec<Grid>, GridError> {
        let grids = self.collection.find(&GridFilter::RoomId(room_id.to_string())).await?;
        debug!(room_id, count = grids.len(), "grids_by_room");
        Ok(grids)
    }

    /// Always inserts a new document under a freshly assigned id.
    #[instrument(skip(self, grid), fields(room_id = %grid.room_id))]
    pub async fn save(&self, grid: NewGrid) -> Result<Grid, GridError> {
        let grid = grid.into_grid(ObjectId::new());
        self.collection.insert_one(grid.clone()).await?;
        info!(id = %grid.id, room_id = %grid.room_id, "grid_saved");
        Ok(grid)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<(), GridError> {
        let oid = parse_id(id)?;
        match self.collection.delete_one(&GridFilter::Id(oid)).await? {
            0 => Err(GridError::NotFound),
            _ => {
                info!(id = %oid, "grid_deleted");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ServiceError;
    use crate::grid::repo::MemoryGridCollection;
    use async_trait::async_trait;
    use chrono::Utc;
    use models::GridCell;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts every call so tests can prove the store was never reached.
    #[derive(Default)]
    struct CountingCollection {
        inner: MemoryGridCollection,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GridCollection for CountingCollection {
        async fn find(&self, filter: &GridFilter) -> Result<Vec<Grid>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find(filter).await
        }
        async fn insert_one(&self, grid: Grid) -> Result<(), ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.insert_one(grid).await
        }
        async fn delete_one(&self, filter: &GridFilter) -> Result<u64, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_one(filter).await
        }
    }

    fn store() -> GridStore<MemoryGridCollection> {
        GridStore::new(Arc::new(MemoryGridCollection::new()))
    }

    #[tokio::test]
    async fn malformed_ids_never_reach_the_collection() {
        let coll = Arc::new(CountingCollection::default());
        let store = GridStore::new(Arc::clone(&coll));
        for bad in ["bad", "", "588935f5c668650dc77df58", "588935f5c668650dc77df581x", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
            assert!(matches!(store.get_by_id(bad).await, Err(GridError::InvalidIdentifier)));
            assert!(matches!(store.delete_by_id(bad).await, Err(GridError::InvalidIdentifier)));
        }
        assert_eq!(coll.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn absent_ids_are_not_found() {
        let store = store();
        assert!(matches!(store.get_by_id("588935f5c668650dc77df581").await, Err(GridError::NotFound)));
        assert!(matches!(store.delete_by_id("588935f5c668650dc77df581").await, Err(GridError::NotFound)));
    }

    #[tokio::test]
    async fn save_assigns_id_and_get_returns_same_content() -> Result<(), anyhow::Error> {
        let store = store();
        let input = NewGrid::new("Test Room")
            .with_name("Test Name")
            .with_cells(vec![vec![None, Some(GridCell(json!({"value": "q"})))], vec![None, None]])
            .saved_at(Utc::now());

        let saved = store.save(input.clone()).await?;
        let fetched = store.get_by_id(&saved.id.to_hex()).await?;
        assert_eq!(fetched, saved);
        assert_eq!(fetched.content(), input);

        let second = store.save(input).await?;
        assert_ne!(second.id, saved.id);
        assert_eq!(store.count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn list_by_room_filters_exactly() -> Result<(), anyhow::Error> {
        let store = store();
        let a = store.save(NewGrid::new("room1").with_name("Test Grid 1")).await?;
        let b = store.save(NewGrid::new("room1").with_name("Test Grid 2")).await?;
        store.save(NewGrid::new("room3")).await?;

        let room1 = store.list_by_room("room1").await?;
        assert_eq!(room1.len(), 2);
        assert!(room1.contains(&a) && room1.contains(&b));
        assert!(store.list_by_room("room2").await?.is_empty());
        assert_eq!(store.list_all().await?.len() as u64, store.count().await?);
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_not_idempotent() -> Result<(), anyhow::Error> {
        let store = store();
        let g = store.save(NewGrid::new("My Room")).await?;
        let id = g.id.to_hex();

        store.delete_by_id(&id).await?;
        assert!(matches!(store.get_by_id(&id).await, Err(GridError::NotFound)));
        assert!(matches!(store.delete_by_id(&id).await, Err(GridError::NotFound)));
        assert_eq!(store.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_deletes_have_one_winner() -> Result<(), anyhow::Error> {
        let store = store();
        let g = store.save(NewGrid::new("race")).await?;
        let id = g.id.to_hex();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let id = id.clone();
                tokio::spawn(async move { store.delete_by_id(&id).await })
            })
            .collect();

        let mut ok = 0;
        let mut not_found = 0;
        for h in handles {
            match h.await? {
                Ok(()) => ok += 1,
                Err(GridError::NotFound) => not_found += 1,
                Err(e) => return Err(e.into()),
            }
        }
        assert_eq!((ok, not_found), (1, 7));
        Ok(())
    }
}
