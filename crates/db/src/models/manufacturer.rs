//! Manufacturer model and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `manufacturers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Manufacturer {
    pub id: DbId,
    pub name: String,
    /// Uppercase `[A-Z0-9_-]` code, unique.
    pub code: String,
    pub country: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateManufacturer {
    pub name: String,
    pub code: String,
    pub country: Option<String>,
    pub notes: Option<String>,
}
