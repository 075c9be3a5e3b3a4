//! Repository for the `parts` table, including the filtered listing.

use armory_core::editor::LinkOption;
use armory_core::filter::{FitmentConstraint, PartPredicate};
use armory_core::types::DbId;
use sqlx::PgPool;

use crate::models::part::{CreatePart, Part, PartListItem};

const COLUMNS: &str = "id, slug, sku, title, description, category_id, stock_status, \
    condition, authenticity, quantity, notes, created_at, updated_at";

const LIST_COLUMNS: &str = "p.id, p.slug, p.sku, p.title, p.stock_status, p.condition, \
    p.authenticity, p.quantity, c.slug AS category_slug, c.name AS category_name, p.updated_at";

/// Provides CRUD operations and the predicate listing for parts.
pub struct PartRepo;

impl PartRepo {
    /// Insert a part. The caller supplies resolved defaults for every field.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreatePart,
    ) -> Result<Part, sqlx::Error> {
        let query = format!(
            "INSERT INTO parts
                (slug, sku, title, description, category_id, stock_status,
                 condition, authenticity, quantity, notes)
             VALUES ($1, $2, $3, $4, $5,
                     COALESCE($6, 'OUT_OF_STOCK'), COALESCE($7, 'UNKNOWN'),
                     COALESCE($8, 'UNKNOWN'), COALESCE($9, 0), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(slug)
            .bind(&input.sku)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.stock_status)
            .bind(&input.condition)
            .bind(&input.authenticity)
            .bind(input.quantity)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Part>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parts WHERE id = $1");
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Part>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parts WHERE slug = $1");
        sqlx::query_as::<_, Part>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Replace all editable fields. Omitted enum-like fields reset to their
    /// defaults.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        slug: &str,
        input: &CreatePart,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET
                slug = $2, sku = $3, title = $4, description = $5, category_id = $6,
                stock_status = COALESCE($7, 'OUT_OF_STOCK'),
                condition = COALESCE($8, 'UNKNOWN'),
                authenticity = COALESCE($9, 'UNKNOWN'),
                quantity = COALESCE($10, 0),
                notes = $11
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(slug)
            .bind(&input.sku)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.category_id)
            .bind(&input.stock_status)
            .bind(&input.condition)
            .bind(&input.authenticity)
            .bind(input.quantity)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List parts matching `predicate`, optionally narrowed by a free-text
    /// search over slug, sku and title. Most recently updated first.
    pub async fn list(
        pool: &PgPool,
        predicate: &PartPredicate,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PartListItem>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if predicate.category_slug.is_some() {
            conditions.push(format!("c.slug = ${param_idx}"));
            param_idx += 1;
        }
        if predicate.stock_status.is_some() {
            conditions.push(format!("p.stock_status = ${param_idx}"));
            param_idx += 1;
        }
        if predicate.condition.is_some() {
            conditions.push(format!("p.condition = ${param_idx}"));
            param_idx += 1;
        }
        if predicate.authenticity.is_some() {
            conditions.push(format!("p.authenticity = ${param_idx}"));
            param_idx += 1;
        }
        match &predicate.fitment {
            Some(FitmentConstraint::Model(_)) => {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM part_fitments pf \
                     JOIN firearm_models fm ON fm.id = pf.firearm_model_id \
                     WHERE pf.part_id = p.id AND fm.slug = ${param_idx})"
                ));
                param_idx += 1;
            }
            Some(FitmentConstraint::Variant(_)) => {
                conditions.push(format!(
                    "EXISTS (SELECT 1 FROM part_fitments pf \
                     JOIN firearm_variants fv ON fv.id = pf.firearm_variant_id \
                     WHERE pf.part_id = p.id AND fv.slug = ${param_idx})"
                ));
                param_idx += 1;
            }
            None => {}
        }
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        if pattern.is_some() {
            conditions.push(format!(
                "(p.slug ILIKE ${param_idx} OR p.sku ILIKE ${param_idx} OR p.title ILIKE ${param_idx})"
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {LIST_COLUMNS} FROM parts p \
             LEFT JOIN categories c ON c.id = p.category_id \
             {where_clause} \
             ORDER BY p.updated_at DESC, p.id \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, PartListItem>(&query);

        if let Some(slug) = &predicate.category_slug {
            q = q.bind(slug);
        }
        if let Some(status) = predicate.stock_status {
            q = q.bind(status.as_str());
        }
        if let Some(condition) = &predicate.condition {
            q = q.bind(condition);
        }
        if let Some(authenticity) = &predicate.authenticity {
            q = q.bind(authenticity);
        }
        match &predicate.fitment {
            Some(FitmentConstraint::Model(slug)) | Some(FitmentConstraint::Variant(slug)) => {
                q = q.bind(slug);
            }
            None => {}
        }
        if let Some(p) = &pattern {
            q = q.bind(p);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Editor option feed: most recently updated parts, labelled
    /// `"{title} ({sku})"`.
    pub async fn list_options(pool: &PgPool, limit: i64) -> Result<Vec<LinkOption>, sqlx::Error> {
        let rows: Vec<(DbId, String, String)> = sqlx::query_as(
            "SELECT id, slug, COALESCE(NULLIF(title, ''), slug) || COALESCE(' (' || sku || ')', '')
             FROM parts ORDER BY updated_at DESC LIMIT $1",
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

/// `%term%` with LIKE metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}
