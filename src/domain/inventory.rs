//! Inventory Item Entity
//!
//! A warehouse- or locker-scoped item, aggregated by category for display.

use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Where an inventory item is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    #[default]
    Warehouse,
    Locker,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Warehouse => "warehouse",
            StorageScope::Locker => "locker",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "locker" => StorageScope::Locker,
            _ => StorageScope::Warehouse,
        }
    }
}

/// An item held in the cosmic warehouse or the body-mod locker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Unique identifier
    pub id: u32,
    pub name: String,
    /// Free-text category; blank rolls up as "Uncategorized"
    pub category: String,
    pub quantity: i64,
    pub scope: StorageScope,
    pub notes: Option<String>,
}

impl InventoryItem {
    pub fn new(id: u32, name: String, scope: StorageScope) -> Self {
        Self {
            id,
            name,
            category: String::new(),
            quantity: 1,
            scope,
            notes: None,
        }
    }
}

impl Entity for InventoryItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_round_trip() {
        assert_eq!(StorageScope::from_str("locker"), StorageScope::Locker);
        assert_eq!(StorageScope::from_str("warehouse"), StorageScope::Warehouse);
        // Unknown scopes land in the warehouse
        assert_eq!(StorageScope::from_str(""), StorageScope::Warehouse);
    }
}
