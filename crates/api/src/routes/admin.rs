//! Route definitions for the admin area.
//!
//! Mounted at `/admin` by `api_routes()`. Every handler except login and
//! logout takes the `AdminSession` extractor.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{admin_session, catalog, diagrams, parts};
use crate::state::AppState;

/// Admin routes.
///
/// ```text
/// POST   /login                      -> login
/// POST   /logout                     -> logout
///
/// GET    /categories                 -> list_categories
/// POST   /categories                 -> create_category
/// GET    /categories/{id}            -> get_category
/// PUT    /categories/{id}            -> update_category
/// DELETE /categories/{id}            -> delete_category
///
/// (same five for /manufacturers, /models, /variants)
///
/// GET    /part-sets                  -> list_part_sets
/// POST   /part-sets                  -> create_part_set
///
/// POST   /parts                      -> create_part
/// GET    /parts/{id}                 -> get_part_admin
/// PUT    /parts/{id}                 -> update_part
/// DELETE /parts/{id}                 -> delete_part
///
/// POST   /fitments                   -> create_fitment
/// DELETE /fitments/{id}              -> delete_fitment
///
/// POST   /diagrams                   -> create_diagram
/// GET    /diagrams/{id}              -> get_diagram_admin
/// PUT    /diagrams/{id}              -> update_diagram
/// DELETE /diagrams/{id}              -> delete_diagram
/// GET    /diagrams/{id}/editor       -> get_editor_data
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin_session::login))
        .route("/logout", post(admin_session::logout))
        // Categories.
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/categories/{id}",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
        // Manufacturers.
        .route(
            "/manufacturers",
            get(catalog::list_manufacturers).post(catalog::create_manufacturer),
        )
        .route(
            "/manufacturers/{id}",
            get(catalog::get_manufacturer)
                .put(catalog::update_manufacturer)
                .delete(catalog::delete_manufacturer),
        )
        // Firearm models.
        .route("/models", get(catalog::list_models).post(catalog::create_model))
        .route(
            "/models/{id}",
            get(catalog::get_model)
                .put(catalog::update_model)
                .delete(catalog::delete_model),
        )
        // Firearm variants.
        .route(
            "/variants",
            get(catalog::list_variants).post(catalog::create_variant),
        )
        .route(
            "/variants/{id}",
            get(catalog::get_variant)
                .put(catalog::update_variant)
                .delete(catalog::delete_variant),
        )
        // Part sets.
        .route(
            "/part-sets",
            get(catalog::list_part_sets).post(catalog::create_part_set),
        )
        // Parts.
        .route("/parts", post(parts::create_part))
        .route(
            "/parts/{id}",
            get(parts::get_part_admin)
                .put(parts::update_part)
                .delete(parts::delete_part),
        )
        // Fitments.
        .route("/fitments", post(catalog::create_fitment))
        .route("/fitments/{id}", delete(catalog::delete_fitment))
        // Diagrams.
        .route("/diagrams", post(diagrams::create_diagram))
        .route(
            "/diagrams/{id}",
            get(diagrams::get_diagram_admin)
                .put(diagrams::update_diagram)
                .delete(diagrams::delete_diagram),
        )
        .route("/diagrams/{id}/editor", get(diagrams::get_editor_data))
}
