//! Repository for the `firearm_variants` table.

use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::firearm_variant::{CreateFirearmVariant, FirearmVariant};

const COLUMNS: &str = "id, firearm_model_id, manufacturer_id, name, slug, \
    year_from, year_to, notes, created_at, updated_at";

pub struct FirearmVariantRepo;

impl FirearmVariantRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFirearmVariant,
    ) -> Result<FirearmVariant, sqlx::Error> {
        let query = format!(
            "INSERT INTO firearm_variants
                (firearm_model_id, manufacturer_id, name, slug, year_from, year_to, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FirearmVariant>(&query)
            .bind(input.firearm_model_id)
            .bind(input.manufacturer_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.year_from)
            .bind(input.year_to)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FirearmVariant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firearm_variants WHERE id = $1");
        sqlx::query_as::<_, FirearmVariant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<FirearmVariant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM firearm_variants ORDER BY name ASC");
        sqlx::query_as::<_, FirearmVariant>(&query).fetch_all(pool).await
    }

    /// Variants of one model, oldest production start first. Variants with
    /// no `year_from` sort last.
    pub async fn list_by_model(
        pool: &PgPool,
        firearm_model_id: DbId,
    ) -> Result<Vec<FirearmVariant>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM firearm_variants
             WHERE firearm_model_id = $1
             ORDER BY year_from ASC NULLS LAST, name ASC"
        );
        sqlx::query_as::<_, FirearmVariant>(&query)
            .bind(firearm_model_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateFirearmVariant,
    ) -> Result<Option<FirearmVariant>, sqlx::Error> {
        let query = format!(
            "UPDATE firearm_variants SET
                firearm_model_id = $2, manufacturer_id = $3, name = $4, slug = $5,
                year_from = $6, year_to = $7, notes = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FirearmVariant>(&query)
            .bind(id)
            .bind(input.firearm_model_id)
            .bind(input.manufacturer_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.year_from)
            .bind(input.year_to)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM firearm_variants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
