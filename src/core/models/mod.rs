//! Data models: tiers, the course catalog, and grade sheets

pub mod catalog;
pub mod sheet;
pub mod tier;

pub use catalog::{Catalog, CatalogHit, CatalogItem, TierCatalog};
pub use sheet::GradeSheet;
pub use tier::{ItemKind, Tier};
