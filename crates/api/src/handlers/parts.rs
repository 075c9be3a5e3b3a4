//! Part listing (public) and part maintenance (admin).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use armory_core::catalog::{
    normalize_slug, require_non_empty, slugify, trim_optional, validate_slug, StockStatus,
    DEFAULT_AUTHENTICITY, DEFAULT_CONDITION,
};
use armory_core::error::CoreError;
use armory_core::filter::{predicate_from_token, PartPredicate};
use armory_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use armory_core::types::DbId;
use armory_db::models::fitment::PartFitment;
use armory_db::models::part::{CreatePart, Part, PartListItem, PartListParams};
use armory_db::repositories::{FitmentRepo, PartRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::admin::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartListing {
    /// Whether the `f` token contributed any constraint.
    pub filter_applied: bool,
    pub in_stock: bool,
    pub parts: Vec<PartListItem>,
}

#[derive(Debug, Serialize)]
pub struct PartDetail {
    #[serde(flatten)]
    pub part: Part,
    pub fitments: Vec<PartFitment>,
}

/// `inStock` is on unless explicitly `0`.
pub(crate) fn in_stock_flag(raw: Option<&str>) -> bool {
    raw.map(str::trim) != Some("0")
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Part", id })
}

/// Normalize a part body and resolve its slug.
fn prepare_part(input: &CreatePart) -> AppResult<(String, CreatePart)> {
    let title = require_non_empty("title", &input.title)?;

    let slug = match trim_optional(input.slug.as_deref()) {
        Some(s) => normalize_slug(&s),
        None => slugify(&title),
    };
    validate_slug("slug", &slug)?;

    let stock_status = StockStatus::from_input(input.stock_status.as_deref())?;

    if matches!(input.quantity, Some(q) if q < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "quantity must not be negative".into(),
        )));
    }

    let prepared = CreatePart {
        slug: Some(slug.clone()),
        sku: trim_optional(input.sku.as_deref()),
        title,
        description: trim_optional(input.description.as_deref()),
        category_id: input.category_id,
        stock_status: Some(stock_status.as_str().to_string()),
        condition: Some(
            trim_optional(input.condition.as_deref())
                .unwrap_or_else(|| DEFAULT_CONDITION.to_string()),
        ),
        authenticity: Some(
            trim_optional(input.authenticity.as_deref())
                .unwrap_or_else(|| DEFAULT_AUTHENTICITY.to_string()),
        ),
        quantity: Some(input.quantity.unwrap_or(0)),
        notes: trim_optional(input.notes.as_deref()),
    };

    Ok((slug, prepared))
}

// ---------------------------------------------------------------------------
// GET /parts
// ---------------------------------------------------------------------------

/// Filtered part listing.
///
/// The base predicate comes from `inStock` and `cat`; the decoded `f` token
/// is overlaid on top and wins on every field it sets. A malformed token
/// applies no filter.
pub async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<PartListParams>,
) -> AppResult<impl IntoResponse> {
    let in_stock = in_stock_flag(params.in_stock.as_deref());
    let from_token = predicate_from_token(params.f.as_deref());
    let filter_applied = !from_token.is_empty();

    let predicate = PartPredicate::base(in_stock, params.cat.as_deref()).overlay(from_token);
    let search = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);
    let offset = clamp_offset(params.offset);

    let parts = PartRepo::list(&state.pool, &predicate, search, limit, offset).await?;

    tracing::debug!(
        count = parts.len(),
        filter_applied,
        in_stock,
        "Listed parts",
    );

    Ok(Json(DataResponse {
        data: PartListing {
            filter_applied,
            in_stock,
            parts,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /parts/{slug}
// ---------------------------------------------------------------------------

/// Part detail with its fitments.
pub async fn get_part(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let part = PartRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| slug_not_found("Part", &slug))?;
    let fitments = FitmentRepo::list_by_part(&state.pool, part.id).await?;
    Ok(Json(DataResponse {
        data: PartDetail { part, fitments },
    }))
}

/// 404 for lookups keyed by slug rather than id.
pub(crate) fn slug_not_found(entity: &str, slug: &str) -> AppError {
    AppError::NotFound(format!("{entity} '{slug}' not found"))
}

// ---------------------------------------------------------------------------
// POST /admin/parts
// ---------------------------------------------------------------------------

/// Create a part. A blank slug is derived from the title.
pub async fn create_part(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreatePart>,
) -> AppResult<impl IntoResponse> {
    let (slug, input) = prepare_part(&input)?;
    let part = PartRepo::create(&state.pool, &slug, &input).await?;

    tracing::info!(part_id = %part.id, slug = %part.slug, "Part created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: part })))
}

// ---------------------------------------------------------------------------
// GET /admin/parts/{id}
// ---------------------------------------------------------------------------

/// Part by id with its fitments.
pub async fn get_part_admin(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let part = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let fitments = FitmentRepo::list_by_part(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: PartDetail { part, fitments },
    }))
}

// ---------------------------------------------------------------------------
// PUT /admin/parts/{id}
// ---------------------------------------------------------------------------

/// Replace a part.
pub async fn update_part(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreatePart>,
) -> AppResult<impl IntoResponse> {
    let (slug, input) = prepare_part(&input)?;
    let part = PartRepo::update(&state.pool, id, &slug, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(part_id = %id, "Part updated");
    Ok(Json(DataResponse { data: part }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/parts/{id}
// ---------------------------------------------------------------------------

/// Delete a part. Hotspots that linked to it become non-interactive.
pub async fn delete_part(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PartRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(part_id = %id, "Part deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn body(title: &str) -> CreatePart {
        CreatePart {
            slug: None,
            sku: Some("  K98-EXT-01 ".into()),
            title: title.into(),
            description: None,
            category_id: None,
            stock_status: None,
            condition: Some(" ".into()),
            authenticity: None,
            quantity: None,
            notes: None,
        }
    }

    #[test]
    fn in_stock_defaults_on() {
        assert!(in_stock_flag(None));
        assert!(in_stock_flag(Some("1")));
        assert!(in_stock_flag(Some("")));
        assert!(!in_stock_flag(Some("0")));
    }

    #[test]
    fn slug_derived_from_title_and_defaults_filled() {
        let (slug, prepared) = prepare_part(&body("K98k Extractor, late war")).unwrap();
        assert_eq!(slug, "k98k-extractor-late-war");
        assert_eq!(prepared.sku.as_deref(), Some("K98-EXT-01"));
        assert_eq!(prepared.stock_status.as_deref(), Some("OUT_OF_STOCK"));
        assert_eq!(prepared.condition.as_deref(), Some(DEFAULT_CONDITION));
        assert_eq!(prepared.authenticity.as_deref(), Some(DEFAULT_AUTHENTICITY));
        assert_eq!(prepared.quantity, Some(0));
    }

    #[test]
    fn blank_title_rejected() {
        assert_matches!(
            prepare_part(&body("   ")),
            Err(AppError::Core(CoreError::Validation(msg))) if msg == "title is required"
        );
    }

    #[test]
    fn unknown_stock_status_rejected() {
        let mut input = body("Bolt");
        input.stock_status = Some("MAYBE".into());
        assert_matches!(
            prepare_part(&input),
            Err(AppError::Core(CoreError::Validation(_)))
        );
    }
}
