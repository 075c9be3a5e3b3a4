//! Part set model and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `part_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartSet {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub stock_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartSet {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub stock_status: Option<String>,
}
