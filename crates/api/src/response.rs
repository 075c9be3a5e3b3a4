//! Shared response envelope types for API handlers.
//!
//! JSON responses use a `{ "data": ... }` envelope. The hotspot ingestion
//! endpoint is the exception and answers with [`CreatedResponse`].

use armory_core::types::DbId;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "ok": true, "id": ... }` body returned by hotspot creation.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub ok: bool,
    pub id: DbId,
}

impl CreatedResponse {
    pub fn new(id: DbId) -> Self {
        Self { ok: true, id }
    }
}
