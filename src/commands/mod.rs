//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to the backend.

mod jump_cmd;
mod asset_cmd;
mod inventory_cmd;
mod profile_cmd;
mod chapter_cmd;
mod stats_cmd;
mod settings_cmd;
mod format_cmd;
mod import_cmd;
mod harvest_cmd;
mod dialog_cmd;

pub use jump_cmd::*;
pub use asset_cmd::*;
pub use inventory_cmd::*;
pub use profile_cmd::*;
pub use chapter_cmd::*;
pub use stats_cmd::*;
pub use settings_cmd::*;
pub use format_cmd::*;
pub use import_cmd::*;
pub use harvest_cmd::*;
pub use dialog_cmd::*;
