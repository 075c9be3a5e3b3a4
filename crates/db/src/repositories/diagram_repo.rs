//! Repository for the `diagrams` table.

use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::diagram::{CreateDiagram, Diagram, DiagramWithModel};

const COLUMNS: &str = "id, title, storage_reference, width_px, height_px, firearm_model_id, \
    created_at, updated_at";

const WITH_MODEL_COLUMNS: &str = "d.id, d.title, d.storage_reference, d.width_px, d.height_px, \
    d.firearm_model_id, m.name AS model_name, m.slug AS model_slug, d.created_at";

pub struct DiagramRepo;

impl DiagramRepo {
    pub async fn create(pool: &PgPool, input: &CreateDiagram) -> Result<Diagram, sqlx::Error> {
        let query = format!(
            "INSERT INTO diagrams (title, storage_reference, width_px, height_px, firearm_model_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(&input.title)
            .bind(&input.storage_reference)
            .bind(input.width_px)
            .bind(input.height_px)
            .bind(input.firearm_model_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Diagram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM diagrams WHERE id = $1");
        sqlx::query_as::<_, Diagram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM diagrams WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Diagram joined with its model's name and slug.
    pub async fn find_with_model(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DiagramWithModel>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MODEL_COLUMNS} FROM diagrams d \
             LEFT JOIN firearm_models m ON m.id = d.firearm_model_id \
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, DiagramWithModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All diagrams, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DiagramWithModel>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_MODEL_COLUMNS} FROM diagrams d \
             LEFT JOIN firearm_models m ON m.id = d.firearm_model_id \
             ORDER BY d.created_at DESC"
        );
        sqlx::query_as::<_, DiagramWithModel>(&query)
            .fetch_all(pool)
            .await
    }

    /// The oldest diagram attached to a model, if any.
    pub async fn first_for_model(
        pool: &PgPool,
        firearm_model_id: DbId,
    ) -> Result<Option<Diagram>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diagrams WHERE firearm_model_id = $1 \
             ORDER BY created_at ASC LIMIT 1"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(firearm_model_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateDiagram,
    ) -> Result<Option<Diagram>, sqlx::Error> {
        let query = format!(
            "UPDATE diagrams SET
                title = $2, storage_reference = $3, width_px = $4, height_px = $5,
                firearm_model_id = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Diagram>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.storage_reference)
            .bind(input.width_px)
            .bind(input.height_px)
            .bind(input.firearm_model_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a diagram and, by cascade, its hotspots.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM diagrams WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
