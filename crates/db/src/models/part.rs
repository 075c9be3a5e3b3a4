//! Part model, listing row, and DTO.

use armory_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Part {
    pub id: DbId,
    pub slug: String,
    pub sku: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub stock_status: String,
    pub condition: String,
    pub authenticity: String,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Part joined with its category, as shown in listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PartListItem {
    pub id: DbId,
    pub slug: String,
    pub sku: Option<String>,
    pub title: String,
    pub stock_status: String,
    pub condition: String,
    pub authenticity: String,
    pub quantity: i32,
    pub category_slug: Option<String>,
    pub category_name: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a part.
///
/// `slug` may be omitted, in which case it is derived from `title`. Enum-like
/// fields fall back to their defaults when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePart {
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    pub stock_status: Option<String>,
    pub condition: Option<String>,
    pub authenticity: Option<String>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

/// Query parameters for the part listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartListParams {
    /// Filter transport token.
    pub f: Option<String>,
    /// Category slug.
    pub cat: Option<String>,
    /// Free-text search over slug, sku and title.
    pub q: Option<String>,
    /// `"0"` disables the in-stock default.
    #[serde(rename = "inStock")]
    pub in_stock: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
