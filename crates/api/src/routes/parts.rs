//! Route definitions for the public part listing.
//!
//! Mounted at `/parts` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::parts;
use crate::state::AppState;

/// Part routes.
///
/// ```text
/// GET    /             -> list_parts (?f, cat, q, inStock, limit, offset)
/// GET    /{slug}       -> get_part
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(parts::list_parts))
        .route("/{slug}", get(parts::get_part))
}
