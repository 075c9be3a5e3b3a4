//! Firearm model (e.g. "K98k") and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `firearm_models` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FirearmModel {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFirearmModel {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
