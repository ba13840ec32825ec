//! Tauri Commands for the Wiki/Forum Harvester

use tauri::State;

use crate::domain::Chapter;
use crate::format::{format_input_text, FormatOptions};
use crate::harvest::HarvestedDocument;
use crate::repository::Repository;
use crate::AppState;

/// Fetch a supported community page and return its documents
#[tauri::command]
pub async fn harvest_page(
    state: State<'_, AppState>,
    url: String,
) -> Result<Vec<HarvestedDocument>, String> {
    state.harvester.fetch(&url).await
}

/// Save harvested documents as chapters.
///
/// Bodies are normalized through the formatter and de-duplicated by
/// content hash like file imports.
#[tauri::command]
pub async fn import_harvested_documents(
    state: State<'_, AppState>,
    documents: Vec<HarvestedDocument>,
    jump_id: Option<u32>,
) -> Result<Vec<Chapter>, String> {
    let options = FormatOptions::default();
    let mut created = Vec::new();

    for document in documents {
        let body = format_input_text(&document.body, &options);
        let hash = blake3::hash(body.as_bytes()).to_hex().to_string();

        let existing = state
            .chapters
            .find_by_hash(&hash)
            .await
            .map_err(|e| e.to_string())?;
        if existing.is_some() {
            log::info!("Already harvested, skipping {}", document.source_url);
            continue;
        }

        let mut chapter = Chapter::new(0, document.title, body);
        chapter.jump_id = jump_id;
        chapter.source_hash = Some(hash);

        let chapter = state
            .chapters
            .create(&chapter)
            .await
            .map_err(|e| e.to_string())?;
        created.push(chapter);
    }

    Ok(created)
}
