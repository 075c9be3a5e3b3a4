//! Diagram pages: the public overlay render and admin metadata CRUD.

use axum::extract::{Path, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use armory_core::catalog::require_non_empty;
use armory_core::editor::EditorOptions;
use armory_core::error::CoreError;
use armory_core::geometry::DiagramSize;
use armory_core::render::{render_diagram, render_svg, RenderedDiagram};
use armory_core::types::DbId;
use armory_db::models::diagram::{CreateDiagram, Diagram};
use armory_db::repositories::{
    CategoryRepo, DiagramRepo, FirearmModelRepo, HotspotRepo, PartRepo, PartSetRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_diagram_id;
use crate::middleware::admin::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Option feed sizes for the editor.
const PART_OPTIONS: i64 = 200;
const SET_OPTIONS: i64 = 200;
const CATEGORY_OPTIONS: i64 = 500;

/// A diagram with its rendered overlay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramPage {
    pub id: DbId,
    pub title: String,
    pub firearm_model_id: Option<DbId>,
    #[serde(flatten)]
    pub overlay: RenderedDiagram,
}

/// Everything the hotspot editor needs to start a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorData {
    pub diagram_id: DbId,
    pub title: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub default_model_slug: Option<String>,
    pub options: EditorOptions,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Diagram",
        id,
    })
}

/// Public image URL for a diagram, or 422 when none can be derived.
fn image_url(state: &AppState, diagram: &Diagram) -> AppResult<String> {
    state
        .config
        .storage
        .public_url(&diagram.storage_reference)
        .ok_or_else(|| {
            AppError::ImageUnavailable(format!(
                "No public URL for diagram {} image",
                diagram.id
            ))
        })
}

fn diagram_size(state: &AppState, diagram: &Diagram) -> DiagramSize {
    DiagramSize::or_fallback(
        diagram.width_px,
        diagram.height_px,
        state.config.default_diagram_size_px,
    )
}

/// Load a diagram's hotspots and render its overlay.
pub(crate) async fn render_page(state: &AppState, diagram: Diagram) -> AppResult<DiagramPage> {
    let image_url = image_url(state, &diagram)?;
    let size = diagram_size(state, &diagram);

    let rows = HotspotRepo::list_targets(&state.pool, diagram.id).await?;
    let total = rows.len();
    let sources: Vec<_> = rows.into_iter().filter_map(|r| r.into_source()).collect();
    let unreadable = total - sources.len();

    let overlay = render_diagram(size, image_url, &sources);

    let dropped = overlay.dropped + unreadable;
    if dropped > 0 {
        tracing::warn!(diagram_id = %diagram.id, dropped, "Hotspots skipped during render");
    }
    let dangling = overlay.dangling().count();
    if dangling > 0 {
        tracing::warn!(diagram_id = %diagram.id, dangling, "Hotspots with unresolved links");
    }
    tracing::debug!(
        diagram_id = %diagram.id,
        regions = overlay.regions.len(),
        "Rendered diagram",
    );

    Ok(DiagramPage {
        id: diagram.id,
        title: diagram.title,
        firearm_model_id: diagram.firearm_model_id,
        overlay,
    })
}

fn validate_input(input: &CreateDiagram) -> AppResult<CreateDiagram> {
    let title = require_non_empty("title", &input.title)?;
    let storage_reference = require_non_empty("storage_reference", &input.storage_reference)?;
    for (field, value) in [("width_px", input.width_px), ("height_px", input.height_px)] {
        if matches!(value, Some(v) if v <= 0) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{field} must be positive"
            ))));
        }
    }
    Ok(CreateDiagram {
        title,
        storage_reference,
        ..input.clone()
    })
}

// ---------------------------------------------------------------------------
// GET /diagrams
// ---------------------------------------------------------------------------

/// List diagrams newest first, with their model name.
pub async fn list_diagrams(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let diagrams = DiagramRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: diagrams }))
}

// ---------------------------------------------------------------------------
// GET /diagrams/{id}
// ---------------------------------------------------------------------------

/// Diagram metadata, image URL, and rendered overlay regions.
pub async fn get_diagram(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_diagram_id(&raw_id)?;
    let diagram = DiagramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let page = render_page(&state, diagram).await?;
    Ok(Json(DataResponse { data: page }))
}

// ---------------------------------------------------------------------------
// GET /diagrams/{id}/overlay.svg
// ---------------------------------------------------------------------------

/// The overlay as standalone SVG markup.
pub async fn get_overlay_svg(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_diagram_id(&raw_id)?;
    let diagram = DiagramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let page = render_page(&state, diagram).await?;
    Ok(([(CONTENT_TYPE, "image/svg+xml")], render_svg(&page.overlay)))
}

// ---------------------------------------------------------------------------
// POST /admin/diagrams
// ---------------------------------------------------------------------------

/// Register a diagram image.
pub async fn create_diagram(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateDiagram>,
) -> AppResult<impl IntoResponse> {
    let input = validate_input(&input)?;
    let diagram = DiagramRepo::create(&state.pool, &input).await?;

    tracing::info!(diagram_id = %diagram.id, title = %diagram.title, "Diagram created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: diagram })))
}

// ---------------------------------------------------------------------------
// GET /admin/diagrams/{id}
// ---------------------------------------------------------------------------

/// Raw diagram metadata with the owning model.
pub async fn get_diagram_admin(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let diagram = DiagramRepo::find_with_model(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: diagram }))
}

// ---------------------------------------------------------------------------
// PUT /admin/diagrams/{id}
// ---------------------------------------------------------------------------

/// Replace a diagram's metadata. Hotspots are untouched.
pub async fn update_diagram(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDiagram>,
) -> AppResult<impl IntoResponse> {
    let input = validate_input(&input)?;
    let diagram = DiagramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(diagram_id = %id, "Diagram updated");
    Ok(Json(DataResponse { data: diagram }))
}

// ---------------------------------------------------------------------------
// DELETE /admin/diagrams/{id}
// ---------------------------------------------------------------------------

/// Delete a diagram and, by cascade, its hotspots.
pub async fn delete_diagram(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !DiagramRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(diagram_id = %id, "Diagram deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /admin/diagrams/{id}/editor
// ---------------------------------------------------------------------------

/// Host data for the hotspot editor: image, native size, default model slug,
/// and the three link-target option feeds.
pub async fn get_editor_data(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_diagram_id(&raw_id)?;
    let diagram = DiagramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let image_url = image_url(&state, &diagram)?;
    let size = diagram_size(&state, &diagram);

    let default_model_slug = match diagram.firearm_model_id {
        Some(model_id) => FirearmModelRepo::find_by_id(&state.pool, model_id)
            .await?
            .map(|m| m.slug),
        None => None,
    };

    let options = EditorOptions {
        parts: PartRepo::list_options(&state.pool, PART_OPTIONS).await?,
        sets: PartSetRepo::list_options(&state.pool, SET_OPTIONS).await?,
        categories: CategoryRepo::list_options(&state.pool, CATEGORY_OPTIONS).await?,
    };

    tracing::debug!(
        diagram_id = %id,
        parts = options.parts.len(),
        sets = options.sets.len(),
        categories = options.categories.len(),
        "Loaded editor data",
    );

    Ok(Json(DataResponse {
        data: EditorData {
            diagram_id: diagram.id,
            title: diagram.title,
            image_url,
            width: size.width_px,
            height: size.height_px,
            default_model_slug,
            options,
        },
    }))
}
