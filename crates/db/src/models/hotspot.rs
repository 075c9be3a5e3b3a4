//! Diagram hotspot rows.
//!
//! The table stores the link target as four nullable columns gated by
//! `link_type`. [`DiagramHotspot::link`] and
//! [`HotspotTargetRow::into_source`] translate back to the core types.

use armory_core::hotspot::{HotspotLink, LinkColumns, LinkType, ShapeType};
use armory_core::render::HotspotSource;
use armory_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `diagram_hotspots` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramHotspot {
    pub id: DbId,
    pub diagram_id: DbId,
    pub label: String,
    pub shape_type: String,
    #[serde(rename = "points")]
    pub points_json: serde_json::Value,
    pub sort_order: i32,
    pub link_type: String,
    pub part_id: Option<DbId>,
    pub part_set_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub filter_json: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DiagramHotspot {
    pub fn columns(&self) -> LinkColumns {
        LinkColumns {
            part_id: self.part_id,
            part_set_id: self.part_set_id,
            category_id: self.category_id,
            filter_json: self.filter_json.clone(),
        }
    }

    /// The link this row points at, or `None` if its target is gone.
    pub fn link(&self) -> Option<HotspotLink> {
        let link_type = LinkType::parse(&self.link_type)?;
        HotspotLink::from_columns(link_type, &self.columns())
    }
}

/// Hotspot joined with the slugs of its link targets, for rendering.
#[derive(Debug, Clone, FromRow)]
pub struct HotspotTargetRow {
    pub id: DbId,
    pub label: String,
    pub shape_type: String,
    pub points_json: serde_json::Value,
    pub link_type: String,
    pub part_slug: Option<String>,
    pub part_set_slug: Option<String>,
    pub category_slug: Option<String>,
    pub filter_json: Option<serde_json::Value>,
}

impl HotspotTargetRow {
    /// Convert to renderer input. Rows with unrecognised shape or link type
    /// strings yield `None`.
    pub fn into_source(self) -> Option<HotspotSource> {
        Some(HotspotSource {
            id: self.id,
            label: self.label,
            shape_type: ShapeType::parse(&self.shape_type)?,
            points: self.points_json,
            link_type: LinkType::parse(&self.link_type)?,
            part_slug: self.part_slug,
            part_set_slug: self.part_set_slug,
            category_slug: self.category_slug,
            filter_json: self.filter_json,
        })
    }
}
