//! Repository for the `manufacturers` table.

use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::manufacturer::{CreateManufacturer, Manufacturer};

const COLUMNS: &str = "id, name, code, country, notes, created_at, updated_at";

pub struct ManufacturerRepo;

impl ManufacturerRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateManufacturer,
    ) -> Result<Manufacturer, sqlx::Error> {
        let query = format!(
            "INSERT INTO manufacturers (name, code, country, notes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.country)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers WHERE id = $1");
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Manufacturer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM manufacturers ORDER BY name ASC");
        sqlx::query_as::<_, Manufacturer>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateManufacturer,
    ) -> Result<Option<Manufacturer>, sqlx::Error> {
        let query = format!(
            "UPDATE manufacturers SET name = $2, code = $3, country = $4, notes = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manufacturer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(&input.country)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
