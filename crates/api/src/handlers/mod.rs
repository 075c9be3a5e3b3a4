pub mod admin_session;
pub mod catalog;
pub mod diagrams;
pub mod hotspots;
pub mod models;
pub mod parts;

use armory_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse a diagram id taken from the path as a raw string.
pub(crate) fn parse_diagram_id(raw: &str) -> AppResult<DbId> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest("missing diagram id".into()))
}
