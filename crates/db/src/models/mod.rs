//! Row structs and DTOs.
//!
//! Each submodule holds a `FromRow` + `Serialize` row struct and the
//! `Deserialize` input DTO used for both create and full-replace update.

pub mod category;
pub mod diagram;
pub mod firearm_model;
pub mod firearm_variant;
pub mod fitment;
pub mod hotspot;
pub mod manufacturer;
pub mod part;
pub mod part_set;
