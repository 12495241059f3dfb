use utoipa::OpenApi;
use utoipa::ToSchema;
use serde::Serialize;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Grid as returned by the API. Cells are arbitrary JSON values or null.
#[derive(ToSchema, Serialize)]
pub struct GridDoc {
    #[serde(rename = "_id")]
    #[schema(example = "588935f5c668650dc77df581")]
    pub id: String,
    #[serde(rename = "roomID")]
    pub room_id: String,
    pub name: Option<String>,
    #[schema(value_type = Vec<Vec<Object>>)]
    pub grid: Vec<Vec<Option<serde_json::Value>>>,
    #[serde(rename = "lastSaved")]
    #[schema(example = "2024-02-10T12:00:00Z")]
    pub last_saved: Option<String>,
}

#[derive(ToSchema, Serialize)]
pub struct SaveGridRequestDoc {
    #[serde(rename = "roomID")]
    pub room_id: String,
    pub name: Option<String>,
    #[schema(value_type = Option<Vec<Vec<Object>>>)]
    pub grid: Option<Vec<Vec<Option<serde_json::Value>>>>,
    #[serde(rename = "lastSaved")]
    pub last_saved: Option<String>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub status: u16,
    pub title: String,
    pub detail: Option<String>,
    pub code: Option<u16>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::grids::list,
        crate::grids::get,
        crate::grids::list_by_room,
        crate::grids::save,
        crate::grids::delete,
    ),
    components(
        schemas(
            HealthResponse,
            GridDoc,
            SaveGridRequestDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "grids")
    )
)]
pub struct ApiDoc;
