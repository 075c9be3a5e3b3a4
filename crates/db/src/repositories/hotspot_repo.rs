//! Repository for the `diagram_hotspots` table.
//!
//! Writes take a validated [`HotspotDraft`] and always bind all four link
//! columns from `HotspotLink::into_columns`, so only the column matching
//! `link_type` can ever be populated.

use armory_core::hotspot::HotspotDraft;
use armory_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::hotspot::{DiagramHotspot, HotspotTargetRow};

const COLUMNS: &str = "id, diagram_id, label, shape_type, points_json, sort_order, link_type, \
    part_id, part_set_id, category_id, filter_json, created_at, updated_at";

/// Provides create/update/delete and the render read for hotspots.
pub struct HotspotRepo;

impl HotspotRepo {
    /// Insert a hotspot on `diagram_id`.
    pub async fn create(
        pool: &PgPool,
        diagram_id: DbId,
        draft: &HotspotDraft,
    ) -> Result<DiagramHotspot, sqlx::Error> {
        let cols = draft.link.clone().into_columns();
        let query = format!(
            "INSERT INTO diagram_hotspots
                (diagram_id, label, shape_type, points_json, sort_order, link_type,
                 part_id, part_set_id, category_id, filter_json)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiagramHotspot>(&query)
            .bind(diagram_id)
            .bind(&draft.label)
            .bind(draft.shape_type.as_str())
            .bind(Json(&draft.points))
            .bind(draft.sort_order)
            .bind(draft.link.link_type().as_str())
            .bind(cols.part_id)
            .bind(cols.part_set_id)
            .bind(cols.category_id)
            .bind(cols.filter_json)
            .fetch_one(pool)
            .await
    }

    /// Rewrite a hotspot in place, including all four link columns.
    ///
    /// Returns `None` if no hotspot with `id` exists on `diagram_id`.
    pub async fn update(
        pool: &PgPool,
        diagram_id: DbId,
        id: DbId,
        draft: &HotspotDraft,
    ) -> Result<Option<DiagramHotspot>, sqlx::Error> {
        let cols = draft.link.clone().into_columns();
        let query = format!(
            "UPDATE diagram_hotspots SET
                label = $3, shape_type = $4, points_json = $5, sort_order = $6,
                link_type = $7, part_id = $8, part_set_id = $9, category_id = $10,
                filter_json = $11
             WHERE id = $1 AND diagram_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiagramHotspot>(&query)
            .bind(id)
            .bind(diagram_id)
            .bind(&draft.label)
            .bind(draft.shape_type.as_str())
            .bind(Json(&draft.points))
            .bind(draft.sort_order)
            .bind(draft.link.link_type().as_str())
            .bind(cols.part_id)
            .bind(cols.part_set_id)
            .bind(cols.category_id)
            .bind(cols.filter_json)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        diagram_id: DbId,
        id: DbId,
    ) -> Result<Option<DiagramHotspot>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM diagram_hotspots WHERE id = $1 AND diagram_id = $2");
        sqlx::query_as::<_, DiagramHotspot>(&query)
            .bind(id)
            .bind(diagram_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, diagram_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diagram_hotspots WHERE id = $1 AND diagram_id = $2")
            .bind(id)
            .bind(diagram_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Raw hotspots of a diagram in draw order.
    pub async fn list_by_diagram(
        pool: &PgPool,
        diagram_id: DbId,
    ) -> Result<Vec<DiagramHotspot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagram_hotspots WHERE diagram_id = $1 \
             ORDER BY sort_order ASC, created_at ASC"
        );
        sqlx::query_as::<_, DiagramHotspot>(&query)
            .bind(diagram_id)
            .fetch_all(pool)
            .await
    }

    /// Hotspots of a diagram in draw order, joined with the slug of the
    /// target matching each row's link type.
    pub async fn list_targets(
        pool: &PgPool,
        diagram_id: DbId,
    ) -> Result<Vec<HotspotTargetRow>, sqlx::Error> {
        sqlx::query_as::<_, HotspotTargetRow>(
            "SELECT h.id, h.label, h.shape_type, h.points_json, h.link_type,
                    p.slug AS part_slug, s.slug AS part_set_slug, c.slug AS category_slug,
                    h.filter_json
             FROM diagram_hotspots h
             LEFT JOIN parts p ON p.id = h.part_id
             LEFT JOIN part_sets s ON s.id = h.part_set_id
             LEFT JOIN categories c ON c.id = h.category_id
             WHERE h.diagram_id = $1
             ORDER BY h.sort_order ASC, h.created_at ASC",
        )
        .bind(diagram_id)
        .fetch_all(pool)
        .await
    }
}
