//! Tauri Commands for Budget Summaries and Chain Statistics
//!
//! These load fresh records from the repositories and hand them to the
//! pure aggregation functions; nothing here caches between calls.

use tauri::State;

use crate::budget::{summarize_jump_budget, BudgetSummary};
use crate::repository::Repository;
use crate::stats::{compute_statistics_snapshot, StatisticsSnapshot};
use crate::AppState;

/// Summarize one jump's CP budget from its assets
#[tauri::command]
pub async fn summarize_budget(
    state: State<'_, AppState>,
    jump_id: u32,
) -> Result<BudgetSummary, String> {
    let jump = state
        .jumps
        .find_by_id(jump_id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Jump {} not found", jump_id))?;

    let assets = state
        .assets
        .list_by_jump(jump_id)
        .await
        .map_err(|e| e.to_string())?;

    Ok(summarize_jump_budget(jump.budget, &assets))
}

/// Compute the full statistics snapshot across the chain
#[tauri::command]
pub async fn compute_statistics(
    state: State<'_, AppState>,
) -> Result<StatisticsSnapshot, String> {
    let jumps = state.jumps.list().await.map_err(|e| e.to_string())?;
    let assets = state.assets.list().await.map_err(|e| e.to_string())?;
    let inventory = state.inventory.list().await.map_err(|e| e.to_string())?;
    let profiles = state.profiles.list().await.map_err(|e| e.to_string())?;
    let settings = state.settings.load().await.map_err(|e| e.to_string())?;

    Ok(compute_statistics_snapshot(
        &jumps, &assets, &inventory, &profiles, &settings,
    ))
}
