//! Repository for the `firearm_models` table.

use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::firearm_model::{CreateFirearmModel, FirearmModel};

const COLUMNS: &str = "id, name, slug, description, created_at, updated_at";

pub struct FirearmModelRepo;

impl FirearmModelRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFirearmModel,
    ) -> Result<FirearmModel, sqlx::Error> {
        let query = format!(
            "INSERT INTO firearm_models (name, slug, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FirearmModel>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FirearmModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firearm_models WHERE id = $1");
        sqlx::query_as::<_, FirearmModel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<FirearmModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firearm_models WHERE slug = $1");
        sqlx::query_as::<_, FirearmModel>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<FirearmModel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firearm_models ORDER BY name ASC");
        sqlx::query_as::<_, FirearmModel>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateFirearmModel,
    ) -> Result<Option<FirearmModel>, sqlx::Error> {
        let query = format!(
            "UPDATE firearm_models SET name = $2, slug = $3, description = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FirearmModel>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a model. Its variants and fitments cascade; diagrams keep
    /// existing with no model.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM firearm_models WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
