//! Jumpchain Nexus Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Tauri command handlers
//! - format / budget / stats: pure presentation and aggregation logic
//! - import / harvest: file import pipeline and community-page harvester

use std::path::PathBuf;

use tauri::{Emitter, Manager};

pub mod domain;
pub mod repository;
mod commands;

pub mod budget;
pub mod format;
pub mod harvest;
pub mod import;
pub mod stats;

use harvest::Harvester;
use repository::{
    init_db, AssetRepository, ChapterRepository, DbState, InventoryRepository, JumpRepository,
    ProfileRepository, SettingsRepository,
};

/// Application state shared across commands.
///
/// Every repository clones the same connection handle; the composition
/// root owns the init/teardown lifecycle instead of the repositories.
pub struct AppState {
    pub db: DbState,
    pub jumps: JumpRepository,
    pub assets: AssetRepository,
    pub inventory: InventoryRepository,
    pub profiles: ProfileRepository,
    pub chapters: ChapterRepository,
    pub settings: SettingsRepository,
    pub harvester: Harvester,
}

impl AppState {
    fn new(db: DbState) -> Self {
        let conn = db.conn.clone();
        Self {
            jumps: JumpRepository::new(conn.clone()),
            assets: AssetRepository::new(conn.clone()),
            inventory: InventoryRepository::new(conn.clone()),
            profiles: ProfileRepository::new(conn.clone()),
            chapters: ChapterRepository::new(conn.clone()),
            settings: SettingsRepository::new(conn),
            harvester: Harvester::new(),
            db,
        }
    }
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, String> {
    let app_dir = app_handle
        .path()
        .app_data_dir()
        .map_err(|e| e.to_string())?;
    std::fs::create_dir_all(&app_dir).map_err(|e| e.to_string())?;
    Ok(app_dir.join("jumpchain_nexus.db"))
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle()
                .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                    // Focus the existing window when a new instance tries to start
                    if let Some(window) = app.get_webview_window("main") {
                        let _ = window.set_focus();
                    }
                }))?;

            let app_handle = app.handle().clone();
            let db_path = get_db_path(&app_handle)?;

            let db = DbState::new();
            let state = AppState::new(db.clone());

            // Manage state immediately; commands report "Database not
            // initialized" until the background init lands
            app.manage(state);

            tauri::async_runtime::spawn(async move {
                log::info!("Opening database at {}", db_path.display());
                match init_db(&db, &db_path).await {
                    Ok(()) => {
                        log::info!("Database initialized");
                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            log::error!("Failed to emit db-initialized: {}", e);
                        }
                    }
                    Err(e) => {
                        log::error!("Database init failed: {}", e);
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Jumps
            commands::create_jump,
            commands::list_jumps,
            commands::get_jump,
            commands::update_jump,
            commands::delete_jump,
            commands::duplicate_jump,
            commands::reorder_jump,
            // Assets
            commands::create_asset,
            commands::list_assets,
            commands::list_assets_by_type,
            commands::update_asset,
            commands::delete_asset,
            // Inventory
            commands::create_inventory_item,
            commands::list_inventory,
            commands::list_inventory_by_scope,
            commands::update_inventory_item,
            commands::delete_inventory_item,
            // Profiles
            commands::create_profile,
            commands::list_profiles,
            commands::update_profile,
            commands::delete_profile,
            // Chapters
            commands::create_chapter,
            commands::list_chapters,
            commands::list_chapters_by_jump,
            commands::update_chapter,
            commands::delete_chapter,
            commands::reorder_chapter,
            // Budget + statistics
            commands::summarize_budget,
            commands::compute_statistics,
            // Settings
            commands::get_settings,
            commands::update_settings,
            // Formatter
            commands::format_text,
            commands::format_cp,
            // Import
            commands::pick_import_files,
            commands::import_text_files,
            // Harvest
            commands::harvest_page,
            commands::import_harvested_documents,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
