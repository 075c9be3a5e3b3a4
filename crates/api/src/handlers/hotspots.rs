//! Hotspot ingestion and maintenance for a diagram.
//!
//! Every endpoint here is admin-gated. Creation answers with the bare
//! `{ "ok": true, "id": ... }` body the editor expects; the other endpoints
//! use the standard data envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use armory_core::error::CoreError;
use armory_core::hotspot::{validate_hotspot_request, HotspotRequest};
use armory_core::types::DbId;
use armory_db::models::hotspot::DiagramHotspot;
use armory_db::repositories::{DiagramRepo, HotspotRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_diagram_id;
use crate::middleware::admin::AdminSession;
use crate::response::{CreatedResponse, DataResponse};
use crate::state::AppState;

/// A stored hotspot plus whether its link target still exists.
#[derive(Debug, Serialize)]
pub struct HotspotView {
    #[serde(flatten)]
    pub hotspot: DiagramHotspot,
    pub linked: bool,
}

impl From<DiagramHotspot> for HotspotView {
    fn from(hotspot: DiagramHotspot) -> Self {
        let linked = hotspot.link().is_some();
        Self { hotspot, linked }
    }
}

fn hotspot_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Hotspot",
        id,
    })
}

/// Fail with 404 unless the diagram exists.
async fn ensure_diagram(state: &AppState, diagram_id: DbId) -> AppResult<()> {
    if DiagramRepo::exists(&state.pool, diagram_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Diagram",
            id: diagram_id,
        }))
    }
}

// ---------------------------------------------------------------------------
// POST /diagrams/{id}/hotspots
// ---------------------------------------------------------------------------

/// Validate and persist one hotspot.
///
/// Validation runs before any storage access, so a bad body is rejected
/// with 400 even when the diagram does not exist. Bodies that do not parse
/// are rejected the same way.
pub async fn create_hotspot(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<HotspotRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let diagram_id = parse_diagram_id(&raw_id)?;
    let Json(input) = body?;
    let draft = validate_hotspot_request(&input)?;
    ensure_diagram(&state, diagram_id).await?;

    let hotspot = HotspotRepo::create(&state.pool, diagram_id, &draft).await?;

    tracing::info!(
        diagram_id = %diagram_id,
        hotspot_id = %hotspot.id,
        link_type = %hotspot.link_type,
        vertices = draft.points.len(),
        "Hotspot created",
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(hotspot.id))))
}

// ---------------------------------------------------------------------------
// GET /diagrams/{id}/hotspots
// ---------------------------------------------------------------------------

/// List a diagram's hotspots in render order.
pub async fn list_hotspots(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let diagram_id = parse_diagram_id(&raw_id)?;
    ensure_diagram(&state, diagram_id).await?;

    let hotspots: Vec<HotspotView> = HotspotRepo::list_by_diagram(&state.pool, diagram_id)
        .await?
        .into_iter()
        .map(HotspotView::from)
        .collect();
    tracing::debug!(diagram_id = %diagram_id, count = hotspots.len(), "Listed hotspots");

    Ok(Json(DataResponse { data: hotspots }))
}

// ---------------------------------------------------------------------------
// GET /diagrams/{id}/hotspots/{hotspot_id}
// ---------------------------------------------------------------------------

/// Fetch one hotspot of a diagram.
pub async fn get_hotspot(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path((raw_id, hotspot_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let diagram_id = parse_diagram_id(&raw_id)?;

    let hotspot = HotspotRepo::find_by_id(&state.pool, diagram_id, hotspot_id)
        .await?
        .ok_or_else(|| hotspot_not_found(hotspot_id))?;

    Ok(Json(DataResponse {
        data: HotspotView::from(hotspot),
    }))
}

// ---------------------------------------------------------------------------
// PUT /diagrams/{id}/hotspots/{hotspot_id}
// ---------------------------------------------------------------------------

/// Replace a hotspot. Takes the same body as creation and rewrites all four
/// link columns.
pub async fn update_hotspot(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path((raw_id, hotspot_id)): Path<(String, DbId)>,
    body: Result<Json<HotspotRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let diagram_id = parse_diagram_id(&raw_id)?;
    let Json(input) = body?;
    let draft = validate_hotspot_request(&input)?;
    ensure_diagram(&state, diagram_id).await?;

    let hotspot = HotspotRepo::update(&state.pool, diagram_id, hotspot_id, &draft)
        .await?
        .ok_or_else(|| hotspot_not_found(hotspot_id))?;

    tracing::info!(
        diagram_id = %diagram_id,
        hotspot_id = %hotspot.id,
        link_type = %hotspot.link_type,
        "Hotspot updated",
    );

    Ok(Json(DataResponse {
        data: HotspotView::from(hotspot),
    }))
}

// ---------------------------------------------------------------------------
// DELETE /diagrams/{id}/hotspots/{hotspot_id}
// ---------------------------------------------------------------------------

/// Delete a hotspot.
pub async fn delete_hotspot(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path((raw_id, hotspot_id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let diagram_id = parse_diagram_id(&raw_id)?;

    if !HotspotRepo::delete(&state.pool, diagram_id, hotspot_id).await? {
        return Err(hotspot_not_found(hotspot_id));
    }

    tracing::info!(diagram_id = %diagram_id, hotspot_id = %hotspot_id, "Hotspot deleted");
    Ok(StatusCode::NO_CONTENT)
}
