use std::collections::HashMap;

use axum::http::StatusCode;
use models::{Grid, NewGrid};
use tracing::{debug, instrument};

use super::errors::GridError;
use super::repository::GridCollection;
use super::store::GridStore;

/// Outcome of a grid operation: the status a transport should report and the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct GridResponse<T> {
    pub status: StatusCode,
    pub body: T,
}

impl<T> GridResponse<T> {
    pub fn ok(body: T) -> Self { Self { status: StatusCode::OK, body } }

    pub fn created(body: T) -> Self { Self { status: StatusCode::CREATED, body } }
}

/// Request-shaped grid operations, independent of any web framework.
/// Each call is one store round trip.
pub struct GridService<C: GridCollection + ?Sized> {
    store: GridStore<C>,
}

impl<C: GridCollection + ?Sized> GridService<C> {
    pub fn new(store: GridStore<C>) -> Self { Self { store } }

    pub fn store(&self) -> &GridStore<C> { &self.store }

    /// All grids. Query filters are accepted but not applied; rooms have their own operation.
    pub async fn get_grids(&self, filters: &HashMap<String, String>) -> Result<GridResponse<Vec<Grid>>, GridError> {
        if !filters.is_empty() {
            debug!(?filters, "ignoring grid list filters");
        }
        Ok(GridResponse::ok(self.store.list_all().await?))
    }

    pub async fn get_grid(&self, id: &str) -> Result<GridResponse<Grid>, GridError> {
        Ok(GridResponse::ok(self.store.get_by_id(id).await?))
    }

    pub async fn get_grids_by_room(&self, room_id: &str) -> Result<GridResponse<Vec<Grid>>, GridError> {
        Ok(GridResponse::ok(self.store.list_by_room(room_id).await?))
    }

    /// Deserialize a JSON body into a grid and insert it.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::grid::{GridService, GridStore, repo::MemoryGridCollection};
    /// let svc = GridService::new(GridStore::new(Arc::new(MemoryGridCollection::new())));
    /// let res = tokio_test::block_on(svc.save_grid(br#"{"roomID":"room1","grid":[[null]]}"#)).unwrap();
    /// assert_eq!(res.status, axum::http::StatusCode::CREATED);
    /// assert_eq!(res.body.room_id, "room1");
    /// ```
    #[instrument(skip(self, body), fields(len = body.len()))]
    pub async fn save_grid(&self, body: &[u8]) -> Result<GridResponse<Grid>, GridError> {
        let input: NewGrid = serde_json::from_slice(body)
            .map_err(|e| GridError::Validation(format!("The grid body was not valid: {}", e)))?;
        Ok(GridResponse::created(self.store.save(input).await?))
    }

    pub async fn delete_grid(&self, id: &str) -> Result<GridResponse<()>, GridError> {
        self.store.delete_by_id(id).await?;
        Ok(GridResponse::ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::repo::MemoryGridCollection;
    use crate::grid::repository::GridCollection as _;
    use models::ObjectId;
    use std::sync::Arc;

    async fn seeded() -> Result<(GridService<MemoryGridCollection>, ObjectId), anyhow::Error> {
        let coll = Arc::new(MemoryGridCollection::new());
        coll.insert_one(NewGrid::new("testRoomID").into_grid(ObjectId::new())).await?;
        let known = ObjectId::new();
        coll.insert_one(NewGrid::new("My Room").into_grid(known)).await?;
        Ok((GridService::new(GridStore::new(coll)), known))
    }

    #[tokio::test]
    async fn can_get_all_grids() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let mut filters = HashMap::new();
        filters.insert("roomID".to_string(), "ignored".to_string());
        let res = svc.get_grids(&filters).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.len() as u64, svc.store().count().await?);
        assert_eq!(res.body.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn can_get_grid_by_id() -> Result<(), anyhow::Error> {
        let (svc, known) = seeded().await?;
        let res = svc.get_grid(&known.to_hex()).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.id, known);
        assert_eq!(res.body.room_id, "My Room");
        Ok(())
    }

    #[tokio::test]
    async fn get_grid_with_bad_or_missing_id() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let err = svc.get_grid("bad").await.unwrap_err();
        assert_eq!(err.to_string(), "The requested grid id wasn't a legal Mongo Object ID");
        let err = svc.get_grid("588935f5c668650dc77df581").await.unwrap_err();
        assert_eq!(err.to_string(), "The requested grid was not found");
        Ok(())
    }

    #[tokio::test]
    async fn can_save_grid() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let body = serde_json::json!({
            "name": "Test Name",
            "roomID": "Test Room",
            "grid": [[null, null], [null, null]],
            "lastSaved": "2024-03-01T10:15:30.123Z",
            "_id": "588935f5c668650dc77df581"
        });
        let res = svc.save_grid(&serde_json::to_vec(&body)?).await?;
        assert_eq!(res.status, StatusCode::CREATED);
        assert_ne!(res.body.id.to_hex(), "588935f5c668650dc77df581");
        assert_eq!(res.body.dimensions(), (2, 2));

        let fetched = svc.get_grid(&res.body.id.to_hex()).await?;
        assert_eq!(fetched.body, res.body);
        Ok(())
    }

    #[tokio::test]
    async fn save_grid_rejects_malformed_body() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        let bodies: [&[u8]; 4] = [
            b"not json",
            br#"{"name":"no room"}"#,
            br#"{"roomID":"r","grid":5}"#,
            br#"{"roomID":"r","lastSaved":"yesterday"}"#,
        ];
        for body in bodies {
            let err = svc.save_grid(body).await.unwrap_err();
            assert!(matches!(err, GridError::Validation(_)), "{err}");
            assert!(err.to_string().starts_with("The grid body was not valid"));
        }
        assert_eq!(svc.store().count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn can_get_grids_by_room() -> Result<(), anyhow::Error> {
        let (svc, _) = seeded().await?;
        svc.save_grid(br#"{"roomID":"room1","name":"Test Grid 1","grid":[]}"#).await?;
        svc.save_grid(br#"{"roomID":"room1","name":"Test Grid 2","grid":[]}"#).await?;

        let res = svc.get_grids_by_room("room1").await?;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body.len(), 2);
        assert!(svc.get_grids_by_room("room2").await?.body.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_grid() -> Result<(), anyhow::Error> {
        let (svc, known) = seeded().await?;
        let res = svc.delete_grid(&known.to_hex()).await?;
        assert_eq!(res.status, StatusCode::OK);
        assert!(matches!(svc.get_grid(&known.to_hex()).await, Err(GridError::NotFound)));
        assert!(matches!(svc.delete_grid(&known.to_hex()).await, Err(GridError::NotFound)));
        assert!(matches!(svc.delete_grid("bad").await, Err(GridError::InvalidIdentifier)));
        Ok(())
    }
}
