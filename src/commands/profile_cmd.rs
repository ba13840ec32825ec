//! Tauri Commands for Character Profiles

use tauri::State;

use crate::domain::Profile;
use crate::repository::Repository;
use crate::AppState;

/// Create a character profile
#[tauri::command]
pub async fn create_profile(
    state: State<'_, AppState>,
    name: String,
    background: Option<String>,
) -> Result<Profile, String> {
    let mut profile = Profile::new(0, name);
    profile.background = background;
    state.profiles.create(&profile).await.map_err(|e| e.to_string())
}

/// List all character profiles
#[tauri::command]
pub async fn list_profiles(state: State<'_, AppState>) -> Result<Vec<Profile>, String> {
    state.profiles.list().await.map_err(|e| e.to_string())
}

/// Update a profile; boosters are replaced wholesale when provided
#[tauri::command]
pub async fn update_profile(
    state: State<'_, AppState>,
    id: u32,
    name: Option<String>,
    background: Option<String>,
    boosters: Option<Vec<String>>,
) -> Result<Profile, String> {
    let existing = state
        .profiles
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Profile {} not found", id))?;

    let updated = Profile {
        name: name.unwrap_or(existing.name),
        background: background.or(existing.background),
        boosters: boosters.unwrap_or(existing.boosters),
        ..existing
    };

    state
        .profiles
        .update(&updated)
        .await
        .map_err(|e| e.to_string())
}

/// Delete a profile
#[tauri::command]
pub async fn delete_profile(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.profiles.delete(id).await.map_err(|e| e.to_string())
}
