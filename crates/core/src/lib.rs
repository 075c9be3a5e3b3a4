//! Domain logic for the parts catalog and its exploded-view diagrams.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into these modules for validation, geometry, filter-token handling, and
//! hotspot rendering.

pub mod catalog;
pub mod editor;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod hotspot;
pub mod render;
pub mod search;
pub mod storage;
pub mod types;
