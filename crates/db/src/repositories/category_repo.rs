//! Repository for the `categories` table.

use armory_core::editor::LinkOption;
use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CreateCategory};

const COLUMNS: &str = "id, slug, name, parent_id, description, created_at, updated_at";

/// Provides CRUD operations for part categories.
pub struct CategoryRepo;

impl CategoryRepo {
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (slug, name, parent_id, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Replace all editable fields. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET slug = $2, name = $3, parent_id = $4, description = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(input.parent_id)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Editor option feed: categories by name, labelled with the name.
    pub async fn list_options(pool: &PgPool, limit: i64) -> Result<Vec<LinkOption>, sqlx::Error> {
        let rows: Vec<(DbId, String, String)> =
            sqlx::query_as("SELECT id, slug, name FROM categories ORDER BY name ASC LIMIT $1")
                .bind(limit)
                .fetch_all(pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, slug, label)| LinkOption { id, slug, label })
            .collect())
    }
}
