//! Tauri Commands for Chain Settings

use tauri::State;

use crate::domain::ChainSettings;
use crate::AppState;

/// Load the chain settings (defaults if never saved)
#[tauri::command]
pub async fn get_settings(state: State<'_, AppState>) -> Result<ChainSettings, String> {
    state.settings.load().await.map_err(|e| e.to_string())
}

/// Save the chain settings wholesale
#[tauri::command]
pub async fn update_settings(
    state: State<'_, AppState>,
    settings: ChainSettings,
) -> Result<ChainSettings, String> {
    state
        .settings
        .save(&settings)
        .await
        .map_err(|e| e.to_string())?;
    Ok(settings)
}
