//! Route definitions for diagrams and their hotspots.
//!
//! Mounted at `/diagrams` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{diagrams, hotspots};
use crate::state::AppState;

/// Diagram routes.
///
/// ```text
/// GET    /                              -> list_diagrams
/// GET    /{id}                          -> get_diagram
/// GET    /{id}/overlay.svg              -> get_overlay_svg
/// POST   /{id}/hotspots                 -> create_hotspot (admin)
/// GET    /{id}/hotspots                 -> list_hotspots (admin)
/// GET    /{id}/hotspots/{hotspot_id}    -> get_hotspot (admin)
/// PUT    /{id}/hotspots/{hotspot_id}    -> update_hotspot (admin)
/// DELETE /{id}/hotspots/{hotspot_id}    -> delete_hotspot (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(diagrams::list_diagrams))
        .route("/{id}", get(diagrams::get_diagram))
        .route("/{id}/overlay.svg", get(diagrams::get_overlay_svg))
        .route(
            "/{id}/hotspots",
            get(hotspots::list_hotspots).post(hotspots::create_hotspot),
        )
        .route(
            "/{id}/hotspots/{hotspot_id}",
            get(hotspots::get_hotspot)
                .put(hotspots::update_hotspot)
                .delete(hotspots::delete_hotspot),
        )
}
