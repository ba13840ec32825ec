//! Tauri Commands exposing the Text Formatter over IPC

use tauri::State;

use crate::domain::Separator;
use crate::format::{format_budget, format_input_text, FormatOptions};
use crate::AppState;

/// Normalize pasted text with the given line-break options
#[tauri::command]
pub async fn format_text(
    text: String,
    options: Option<FormatOptions>,
) -> Result<String, String> {
    Ok(format_input_text(&text, &options.unwrap_or_default()))
}

/// Render a CP value; falls back to the saved separator preference
#[tauri::command]
pub async fn format_cp(
    state: State<'_, AppState>,
    value: f64,
    separator: Option<String>,
) -> Result<String, String> {
    let separator = match separator {
        Some(s) => Separator::from_str(&s),
        None => {
            state
                .settings
                .load()
                .await
                .map_err(|e| e.to_string())?
                .separator
        }
    };
    Ok(format_budget(value, separator))
}
