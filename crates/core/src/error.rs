//! Domain errors shared by the catalog, hotspot and editor modules.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A record addressed by id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Submitted data failed a check. The message is shown to the admin as is.
    #[error("{0}")]
    Validation(String),

    /// The operation clashes with work already in progress.
    #[error("{0}")]
    Conflict(String),

    /// The admin session is absent or does not match.
    #[error("{0}")]
    Unauthorized(String),
}
