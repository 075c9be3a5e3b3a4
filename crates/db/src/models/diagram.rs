//! Diagram model and DTOs.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `diagrams` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Diagram {
    pub id: DbId,
    pub title: String,
    /// Object path inside the storage bucket.
    pub storage_reference: String,
    pub width_px: Option<i32>,
    pub height_px: Option<i32>,
    pub firearm_model_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Diagram with the name and slug of its model, for listings and the editor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiagramWithModel {
    pub id: DbId,
    pub title: String,
    pub storage_reference: String,
    pub width_px: Option<i32>,
    pub height_px: Option<i32>,
    pub firearm_model_id: Option<DbId>,
    pub model_name: Option<String>,
    pub model_slug: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDiagram {
    pub title: String,
    pub storage_reference: String,
    pub width_px: Option<i32>,
    pub height_px: Option<i32>,
    pub firearm_model_id: Option<DbId>,
}
