//! Tauri Commands for Jump CRUD + Chain Ordering

use tauri::State;

use crate::domain::{DomainError, Jump};
use crate::repository::{OrderedRepository, Repository};
use crate::AppState;

/// Create a new jump at the end of the chain
#[tauri::command]
pub async fn create_jump(
    state: State<'_, AppState>,
    title: String,
    world: Option<String>,
    budget: Option<i64>,
) -> Result<Jump, String> {
    if title.trim().is_empty() {
        return Err(
            DomainError::InvalidInput("jump title must not be empty".to_string()).to_string(),
        );
    }

    let mut jump = Jump::new(0, title, world.unwrap_or_default());
    if let Some(budget) = budget {
        jump.set_budget(budget).map_err(|e| e.to_string())?;
    }
    state.jumps.create(&jump).await.map_err(|e| e.to_string())
}

/// List all jumps in chain order
#[tauri::command]
pub async fn list_jumps(state: State<'_, AppState>) -> Result<Vec<Jump>, String> {
    state.jumps.list().await.map_err(|e| e.to_string())
}

/// Get jump by ID
#[tauri::command]
pub async fn get_jump(state: State<'_, AppState>, id: u32) -> Result<Option<Jump>, String> {
    state.jumps.find_by_id(id).await.map_err(|e| e.to_string())
}

/// Update jump fields; omitted fields keep their current value
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn update_jump(
    state: State<'_, AppState>,
    id: u32,
    title: Option<String>,
    world: Option<String>,
    status: Option<String>,
    budget: Option<i64>,
    cp_spent: Option<i64>,
    cp_income: Option<i64>,
) -> Result<Jump, String> {
    let existing = state
        .jumps
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Jump {} not found", id))?;

    let mut updated = Jump {
        title: title.unwrap_or(existing.title),
        world: world.unwrap_or(existing.world),
        status: status.unwrap_or(existing.status),
        cp_spent: cp_spent.unwrap_or(existing.cp_spent),
        cp_income: cp_income.unwrap_or(existing.cp_income),
        ..existing
    };
    if let Some(budget) = budget {
        updated.set_budget(budget).map_err(|e| e.to_string())?;
    }

    state.jumps.update(&updated).await.map_err(|e| e.to_string())
}

/// Delete a jump (its assets go with it; chapters are detached)
#[tauri::command]
pub async fn delete_jump(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.jumps.delete(id).await.map_err(|e| e.to_string())
}

/// Duplicate a jump together with its assets
#[tauri::command]
pub async fn duplicate_jump(state: State<'_, AppState>, id: u32) -> Result<Jump, String> {
    state.jumps.duplicate(id).await.map_err(|e| e.to_string())
}

/// Move a jump to a new index in the chain ordering
#[tauri::command]
pub async fn reorder_jump(
    state: State<'_, AppState>,
    id: u32,
    new_index: usize,
) -> Result<(), String> {
    state
        .jumps
        .move_to_index(id, new_index)
        .await
        .map_err(|e| e.to_string())
}
