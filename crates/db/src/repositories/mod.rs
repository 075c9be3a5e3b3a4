//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! `&PgPool` as the first argument.

pub mod category_repo;
pub mod diagram_repo;
pub mod firearm_model_repo;
pub mod firearm_variant_repo;
pub mod fitment_repo;
pub mod hotspot_repo;
pub mod manufacturer_repo;
pub mod part_repo;
pub mod part_set_repo;

pub use category_repo::CategoryRepo;
pub use diagram_repo::DiagramRepo;
pub use firearm_model_repo::FirearmModelRepo;
pub use firearm_variant_repo::FirearmVariantRepo;
pub use fitment_repo::FitmentRepo;
pub use hotspot_repo::HotspotRepo;
pub use manufacturer_repo::ManufacturerRepo;
pub use part_repo::PartRepo;
pub use part_set_repo::PartSetRepo;
