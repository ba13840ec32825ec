//! Tauri Commands for Jump Asset CRUD

use tauri::State;

use crate::domain::{AssetMeta, AssetType, JumpAsset};
use crate::repository::Repository;
use crate::AppState;

/// Create a new asset under a jump
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn create_asset(
    state: State<'_, AppState>,
    jump_id: u32,
    name: String,
    asset_type: Option<String>,
    cost: Option<i64>,
    quantity: Option<i64>,
    discount: Option<bool>,
    freebie: Option<bool>,
    category: Option<String>,
    metadata: Option<AssetMeta>,
) -> Result<JumpAsset, String> {
    let mut asset = JumpAsset::new(
        0,
        jump_id,
        name,
        asset_type.map(|t| AssetType::from_str(&t)).unwrap_or_default(),
        cost.unwrap_or(0),
    );
    asset.quantity = quantity.unwrap_or(1);
    asset.discount = discount.unwrap_or(false);
    asset.freebie = freebie.unwrap_or(false);
    asset.category = category.unwrap_or_default();
    asset.metadata = metadata.unwrap_or_default();

    state.assets.create(&asset).await.map_err(|e| e.to_string())
}

/// List all assets of one jump
#[tauri::command]
pub async fn list_assets(
    state: State<'_, AppState>,
    jump_id: u32,
) -> Result<Vec<JumpAsset>, String> {
    state
        .assets
        .list_by_jump(jump_id)
        .await
        .map_err(|e| e.to_string())
}

/// List all assets of one type across the chain
#[tauri::command]
pub async fn list_assets_by_type(
    state: State<'_, AppState>,
    asset_type: String,
) -> Result<Vec<JumpAsset>, String> {
    state
        .assets
        .list_by_type(AssetType::from_str(&asset_type))
        .await
        .map_err(|e| e.to_string())
}

/// Update asset fields; omitted fields keep their current value
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_asset(
    state: State<'_, AppState>,
    id: u32,
    name: Option<String>,
    asset_type: Option<String>,
    cost: Option<i64>,
    quantity: Option<i64>,
    discount: Option<bool>,
    freebie: Option<bool>,
    category: Option<String>,
    metadata: Option<AssetMeta>,
) -> Result<JumpAsset, String> {
    let existing = state
        .assets
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Asset {} not found", id))?;

    let updated = JumpAsset {
        name: name.unwrap_or(existing.name),
        asset_type: asset_type
            .map(|t| AssetType::from_str(&t))
            .unwrap_or(existing.asset_type),
        cost: cost.unwrap_or(existing.cost),
        quantity: quantity.unwrap_or(existing.quantity),
        discount: discount.unwrap_or(existing.discount),
        freebie: freebie.unwrap_or(existing.freebie),
        category: category.unwrap_or(existing.category),
        metadata: metadata.unwrap_or(existing.metadata),
        ..existing
    };

    state.assets.update(&updated).await.map_err(|e| e.to_string())
}

/// Delete an asset
#[tauri::command]
pub async fn delete_asset(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.assets.delete(id).await.map_err(|e| e.to_string())
}
