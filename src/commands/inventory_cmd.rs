//! Tauri Commands for Inventory CRUD

use tauri::State;

use crate::domain::{InventoryItem, StorageScope};
use crate::repository::Repository;
use crate::AppState;

/// Create an inventory item
#[tauri::command]
pub async fn create_inventory_item(
    state: State<'_, AppState>,
    name: String,
    scope: Option<String>,
    category: Option<String>,
    quantity: Option<i64>,
    notes: Option<String>,
) -> Result<InventoryItem, String> {
    let mut item = InventoryItem::new(
        0,
        name,
        scope.map(|s| StorageScope::from_str(&s)).unwrap_or_default(),
    );
    item.category = category.unwrap_or_default();
    item.quantity = quantity.unwrap_or(1);
    item.notes = notes;

    state.inventory.create(&item).await.map_err(|e| e.to_string())
}

/// List the whole inventory
#[tauri::command]
pub async fn list_inventory(state: State<'_, AppState>) -> Result<Vec<InventoryItem>, String> {
    state.inventory.list().await.map_err(|e| e.to_string())
}

/// List inventory items in one storage scope
#[tauri::command]
pub async fn list_inventory_by_scope(
    state: State<'_, AppState>,
    scope: String,
) -> Result<Vec<InventoryItem>, String> {
    state
        .inventory
        .list_by_scope(StorageScope::from_str(&scope))
        .await
        .map_err(|e| e.to_string())
}

/// Update an inventory item; omitted fields keep their current value
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_inventory_item(
    state: State<'_, AppState>,
    id: u32,
    name: Option<String>,
    scope: Option<String>,
    category: Option<String>,
    quantity: Option<i64>,
    notes: Option<String>,
) -> Result<InventoryItem, String> {
    let existing = state
        .inventory
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Inventory item {} not found", id))?;

    let updated = InventoryItem {
        name: name.unwrap_or(existing.name),
        scope: scope
            .map(|s| StorageScope::from_str(&s))
            .unwrap_or(existing.scope),
        category: category.unwrap_or(existing.category),
        quantity: quantity.unwrap_or(existing.quantity),
        notes: notes.or(existing.notes),
        ..existing
    };

    state
        .inventory
        .update(&updated)
        .await
        .map_err(|e| e.to_string())
}

/// Delete an inventory item
#[tauri::command]
pub async fn delete_inventory_item(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.inventory.delete(id).await.map_err(|e| e.to_string())
}
