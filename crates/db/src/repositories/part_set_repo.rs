//! Repository for the `part_sets` table.

use armory_core::editor::LinkOption;
use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::part_set::{CreatePartSet, PartSet};

const COLUMNS: &str = "id, slug, title, description, stock_status, created_at, updated_at";

pub struct PartSetRepo;

impl PartSetRepo {
    /// Insert a part set. `stock_status` defaults to `OUT_OF_STOCK`.
    pub async fn create(pool: &PgPool, input: &CreatePartSet) -> Result<PartSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO part_sets (slug, title, description, stock_status)
             VALUES ($1, $2, $3, COALESCE($4, 'OUT_OF_STOCK'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PartSet>(&query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.stock_status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PartSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM part_sets WHERE id = $1");
        sqlx::query_as::<_, PartSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recently updated first.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<PartSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM part_sets ORDER BY updated_at DESC LIMIT $1");
        sqlx::query_as::<_, PartSet>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Editor option feed, labelled with the title (or slug when blank).
    pub async fn list_options(pool: &PgPool, limit: i64) -> Result<Vec<LinkOption>, sqlx::Error> {
        let rows: Vec<(DbId, String, String)> = sqlx::query_as(
            "SELECT id, slug, COALESCE(NULLIF(title, ''), slug)
             FROM part_sets ORDER BY updated_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, slug, label)| LinkOption { id, slug, label })
            .collect())
    }
}
