//! Repository Layer
//!
//! Data access abstractions and rusqlite-backed implementations.

mod traits;
mod db;
mod jump_repo;
mod asset_repo;
mod inventory_repo;
mod profile_repo;
mod chapter_repo;
mod settings_repo;

#[cfg(test)]
mod tests;

pub use traits::{OrderedRepository, Repository};
pub use db::{init_db, DbConn, DbState};
pub use jump_repo::JumpRepository;
pub use asset_repo::AssetRepository;
pub use inventory_repo::InventoryRepository;
pub use profile_repo::ProfileRepository;
pub use chapter_repo::ChapterRepository;
pub use settings_repo::SettingsRepository;
