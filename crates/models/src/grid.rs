use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::object_id::ObjectId;

/// One cell of a grid payload. Stored and returned exactly as supplied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridCell(pub serde_json::Value);

/// Rows of cells; `None` marks an absent cell.
pub type GridCells = Vec<Vec<Option<GridCell>>>;

/// A persisted grid document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "roomID")]
    pub room_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grid: GridCells,
    #[serde(rename = "lastSaved", default)]
    pub last_saved: Option<DateTime<Utc>>,
}

/// Save payload: a grid without an identifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewGrid {
    #[serde(rename = "roomID")]
    pub room_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grid: GridCells,
    #[serde(rename = "lastSaved", default)]
    pub last_saved: Option<DateTime<Utc>>,
}

impl NewGrid {
    pub fn new(room_id: impl Into<String>) -> Self {
        Self { room_id: room_id.into(), name: None, grid: Vec::new(), last_saved: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cells(mut self, grid: GridCells) -> Self {
        self.grid = grid;
        self
    }

    pub fn saved_at(mut self, at: DateTime<Utc>) -> Self {
        self.last_saved = Some(at);
        self
    }

    pub fn into_grid(self, id: ObjectId) -> Grid {
        Grid { id, room_id: self.room_id, name: self.name, grid: self.grid, last_saved: self.last_saved }
    }
}

impl Grid {
    /// Everything but the identifier, for comparing a stored grid with what was saved.
    pub fn content(&self) -> NewGrid {
        NewGrid {
            room_id: self.room_id.clone(),
            name: self.name.clone(),
            grid: self.grid.clone(),
            last_saved: self.last_saved,
        }
    }

    /// `(rows, columns of the widest row)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.grid.len(), self.grid.iter().map(Vec::len).max().unwrap_or(0))
    }
}
