//! Repository for the `part_fitments` table.

use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::fitment::{CreatePartFitment, PartFitment};

const COLUMNS: &str = "id, part_id, firearm_model_id, firearm_variant_id, manufacturer_id, \
    confidence, notes, created_at, updated_at";

pub struct FitmentRepo;

impl FitmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePartFitment,
    ) -> Result<PartFitment, sqlx::Error> {
        let query = format!(
            "INSERT INTO part_fitments
                (part_id, firearm_model_id, firearm_variant_id, manufacturer_id, confidence, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PartFitment>(&query)
            .bind(input.part_id)
            .bind(input.firearm_model_id)
            .bind(input.firearm_variant_id)
            .bind(input.manufacturer_id)
            .bind(&input.confidence)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_part(pool: &PgPool, part_id: DbId) -> Result<Vec<PartFitment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM part_fitments WHERE part_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, PartFitment>(&query)
            .bind(part_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM part_fitments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
