//! Firearm variant model and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `firearm_variants` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FirearmVariant {
    pub id: DbId,
    pub firearm_model_id: DbId,
    pub manufacturer_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateFirearmVariant {
    pub firearm_model_id: DbId,
    pub manufacturer_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub notes: Option<String>,
}
