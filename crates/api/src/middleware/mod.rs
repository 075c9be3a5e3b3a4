//! Request extractors that gate access.
//!
//! - [`admin::AdminSession`] -- Requires the shared-secret admin cookie.

pub mod admin;
