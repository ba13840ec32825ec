//! Tauri Commands for Story Chapters

use tauri::State;

use crate::domain::Chapter;
use crate::repository::{OrderedRepository, Repository};
use crate::AppState;

/// Create a chapter at the end of the story ordering
#[tauri::command]
pub async fn create_chapter(
    state: State<'_, AppState>,
    title: String,
    body: Option<String>,
    jump_id: Option<u32>,
) -> Result<Chapter, String> {
    let mut chapter = Chapter::new(0, title, body.unwrap_or_default());
    chapter.jump_id = jump_id;
    state.chapters.create(&chapter).await.map_err(|e| e.to_string())
}

/// List all chapters in story order
#[tauri::command]
pub async fn list_chapters(state: State<'_, AppState>) -> Result<Vec<Chapter>, String> {
    state.chapters.list().await.map_err(|e| e.to_string())
}

/// List chapters attached to one jump
#[tauri::command]
pub async fn list_chapters_by_jump(
    state: State<'_, AppState>,
    jump_id: u32,
) -> Result<Vec<Chapter>, String> {
    state
        .chapters
        .list_by_jump(jump_id)
        .await
        .map_err(|e| e.to_string())
}

/// Update a chapter; omitted fields keep their current value
#[tauri::command]
pub async fn update_chapter(
    state: State<'_, AppState>,
    id: u32,
    title: Option<String>,
    body: Option<String>,
    jump_id: Option<u32>,
) -> Result<Chapter, String> {
    let existing = state
        .chapters
        .find_by_id(id)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Chapter {} not found", id))?;

    let updated = Chapter {
        title: title.unwrap_or(existing.title),
        body: body.unwrap_or(existing.body),
        jump_id: jump_id.or(existing.jump_id),
        ..existing
    };

    state
        .chapters
        .update(&updated)
        .await
        .map_err(|e| e.to_string())
}

/// Delete a chapter
#[tauri::command]
pub async fn delete_chapter(state: State<'_, AppState>, id: u32) -> Result<(), String> {
    state.chapters.delete(id).await.map_err(|e| e.to_string())
}

/// Move a chapter to a new index in the story ordering
#[tauri::command]
pub async fn reorder_chapter(
    state: State<'_, AppState>,
    id: u32,
    new_index: usize,
) -> Result<(), String> {
    state
        .chapters
        .move_to_index(id, new_index)
        .await
        .map_err(|e| e.to_string())
}
