pub mod admin;
pub mod diagrams;
pub mod health;
pub mod models;
pub mod parts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/login, /admin/logout                       admin session (public)
/// /admin/{categories,manufacturers,models,variants} catalog CRUD (admin)
/// /admin/part-sets                                  list, create (admin)
/// /admin/parts[/{id}]                               part CRUD (admin)
/// /admin/fitments[/{id}]                            create, delete (admin)
/// /admin/diagrams[/{id}]                            diagram CRUD (admin)
/// /admin/diagrams/{id}/editor                       editor host data (admin)
///
/// /diagrams                                         list (public)
/// /diagrams/{id}                                    rendered overlay (public)
/// /diagrams/{id}/overlay.svg                        SVG overlay (public)
/// /diagrams/{id}/hotspots[/{hotspot_id}]            hotspot ingestion (admin)
///
/// /parts                                            filtered listing (public)
/// /parts/{slug}                                     part detail (public)
///
/// /models/{slug}                                    model page (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .nest("/diagrams", diagrams::router())
        .nest("/parts", parts::router())
        .nest("/models", models::router())
}
