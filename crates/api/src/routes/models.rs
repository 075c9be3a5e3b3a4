//! Mounted at `/models` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// ```text
/// GET    /{slug}       -> get_model_page (?inStock, limit, offset)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{slug}", get(models::get_model_page))
}
