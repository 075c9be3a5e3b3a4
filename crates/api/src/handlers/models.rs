//! Public firearm model page.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use armory_core::filter::{FitmentConstraint, PartPredicate};
use armory_core::search::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use armory_db::models::firearm_model::FirearmModel;
use armory_db::models::firearm_variant::FirearmVariant;
use armory_db::models::part::{PartListItem, PartListParams};
use armory_db::repositories::{DiagramRepo, FirearmModelRepo, FirearmVariantRepo, PartRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::diagrams::{render_page, DiagramPage};
use crate::handlers::parts::{in_stock_flag, slug_not_found};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPage {
    pub model: FirearmModel,
    pub variants: Vec<FirearmVariant>,
    pub in_stock: bool,
    pub parts: Vec<PartListItem>,
    pub diagram: Option<DiagramPage>,
}

// ---------------------------------------------------------------------------
// GET /models/{slug}
// ---------------------------------------------------------------------------

/// Model with its variants, the parts that fit it, and its first diagram.
///
/// Accepts the listing's `inStock`, `limit`, and `offset` parameters.
pub async fn get_model_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PartListParams>,
) -> AppResult<impl IntoResponse> {
    let model = FirearmModelRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| slug_not_found("Firearm model", &slug))?;

    let variants = FirearmVariantRepo::list_by_model(&state.pool, model.id).await?;

    let in_stock = in_stock_flag(params.in_stock.as_deref());
    let predicate = PartPredicate {
        fitment: Some(FitmentConstraint::Model(model.slug.clone())),
        ..PartPredicate::base(in_stock, None)
    };
    let parts = PartRepo::list(
        &state.pool,
        &predicate,
        None,
        clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        clamp_offset(params.offset),
    )
    .await?;

    let diagram = match DiagramRepo::first_for_model(&state.pool, model.id).await? {
        Some(d) => Some(render_page(&state, d).await?),
        None => None,
    };

    tracing::debug!(
        model_slug = %model.slug,
        variants = variants.len(),
        parts = parts.len(),
        has_diagram = diagram.is_some(),
        "Loaded model page",
    );

    Ok(Json(DataResponse {
        data: ModelPage {
            model,
            variants,
            in_stock,
            parts,
            diagram,
        },
    }))
}
