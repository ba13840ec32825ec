//! Settings Repository
//!
//! Loads and saves the singleton chain settings row. A missing row loads
//! as the defaults.

use rusqlite::params;

use crate::domain::{ChainSettings, DomainError, DomainResult, Separator};

use super::db::DbConn;

pub struct SettingsRepository {
    conn: DbConn,
}

impl SettingsRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    pub async fn load(&self) -> DomainResult<ChainSettings> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT allow_gauntlet, gauntlet_halved, separator FROM settings WHERE id = 1")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(ChainSettings {
                allow_gauntlet: row.get::<_, i32>(0).unwrap_or(1) != 0,
                gauntlet_halved: row.get::<_, i32>(1).unwrap_or(0) != 0,
                separator: Separator::from_str(&row.get::<_, String>(2).unwrap_or_default()),
            })
        } else {
            Ok(ChainSettings::default())
        }
    }

    pub async fn save(&self, settings: &ChainSettings) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT OR REPLACE INTO settings (id, allow_gauntlet, gauntlet_halved, separator)
             VALUES (1, ?, ?, ?)",
            params![
                settings.allow_gauntlet as i32,
                settings.gauntlet_halved as i32,
                settings.separator.as_str()
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}
