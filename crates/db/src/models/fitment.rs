//! Part fitment: which model / variant / manufacturer a part fits.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `part_fitments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartFitment {
    pub id: DbId,
    pub part_id: DbId,
    pub firearm_model_id: Option<DbId>,
    pub firearm_variant_id: Option<DbId>,
    pub manufacturer_id: Option<DbId>,
    pub confidence: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartFitment {
    pub part_id: DbId,
    pub firearm_model_id: Option<DbId>,
    pub firearm_variant_id: Option<DbId>,
    pub manufacturer_id: Option<DbId>,
    pub confidence: Option<String>,
    pub notes: Option<String>,
}
