//! Tauri Commands for Native File Dialogs

use tauri::{command, AppHandle, Runtime};
use tauri_plugin_dialog::DialogExt;

/// Pick text files to import as chapters
#[command]
pub async fn pick_import_files<R: Runtime>(app: AppHandle<R>) -> Result<Option<Vec<String>>, String> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        let selection = app
            .dialog()
            .file()
            .add_filter("Text documents", &["txt", "md", "markdown"])
            .blocking_pick_files();

        match selection {
            Some(paths) => Ok(Some(paths.into_iter().map(|p| p.to_string()).collect())),
            None => Ok(None),
        }
    }
    #[cfg(any(target_os = "android", target_os = "ios"))]
    {
        // Not supported/implemented on mobile for now
        Ok(None)
    }
}
