//! Domain Layer
//!
//! Contains all domain entities and core business rules.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod jump;
mod asset;
mod inventory;
mod profile;
mod chapter;
mod settings;

pub use entity::{DomainError, DomainResult, Entity};
pub use jump::Jump;
pub use asset::{AssetMeta, AssetType, DrawbackSeverity, JumpAsset};
pub use inventory::{InventoryItem, StorageScope};
pub use profile::Profile;
pub use chapter::Chapter;
pub use settings::{ChainSettings, Separator};
