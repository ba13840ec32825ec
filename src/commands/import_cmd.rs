//! Tauri Commands for the File Import Pipeline
//!
//! Dropped or picked text files become chapters. Files whose content hash
//! already exists are skipped, so re-importing a folder is harmless.

use std::path::Path;

use tauri::State;

use crate::domain::Chapter;
use crate::format::FormatOptions;
use crate::import::read_import_file;
use crate::repository::Repository;
use crate::AppState;

/// Import text files as chapters, skipping already-imported content.
///
/// Returns the chapters actually created; duplicates (by content hash,
/// within the batch or against earlier imports) are silently dropped.
#[tauri::command]
pub async fn import_text_files(
    state: State<'_, AppState>,
    paths: Vec<String>,
    jump_id: Option<u32>,
    options: Option<FormatOptions>,
) -> Result<Vec<Chapter>, String> {
    let options = options.unwrap_or_default();
    let mut created = Vec::new();
    let mut seen_hashes = Vec::new();

    for path in &paths {
        let imported = match read_import_file(Path::new(path), &options) {
            Ok(imported) => imported,
            Err(e) => {
                log::warn!("Skipping {}: {}", path, e);
                continue;
            }
        };

        if seen_hashes.contains(&imported.hash) {
            continue;
        }
        let existing = state
            .chapters
            .find_by_hash(&imported.hash)
            .await
            .map_err(|e| e.to_string())?;
        if existing.is_some() {
            log::info!("Already imported, skipping {}", path);
            continue;
        }

        seen_hashes.push(imported.hash.clone());
        let chapter = state
            .chapters
            .create(&imported.into_chapter(jump_id))
            .await
            .map_err(|e| e.to_string())?;
        created.push(chapter);
    }

    log::info!("Imported {} of {} files", created.len(), paths.len());
    Ok(created)
}
