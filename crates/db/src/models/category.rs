//! Part category model and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub slug: String,
    pub name: String,
    pub parent_id: Option<DbId>,
    pub description: Option<String>,
}
