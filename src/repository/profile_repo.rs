//! Profile Repository
//!
//! CRUD over the profiles table. Booster tags are stored as a JSON string
//! array and decoded at this boundary.

use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::domain::{DomainError, DomainResult, Profile};

use super::db::DbConn;
use super::traits::Repository;

pub struct ProfileRepository {
    conn: DbConn,
}

impl ProfileRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Profile> for ProfileRepository {
    async fn create(&self, entity: &Profile) -> DomainResult<Profile> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let boosters = serde_json::to_string(&entity.boosters)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        conn.execute(
            "INSERT INTO profiles (name, background, boosters) VALUES (?, ?, ?)",
            params![entity.name, entity.background, boosters],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut profile = entity.clone();
        profile.id = conn.last_insert_rowid() as u32;
        Ok(profile)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Profile>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, background, boosters FROM profiles WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_profile(row)))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> DomainResult<Vec<Profile>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, background, boosters FROM profiles ORDER BY id ASC")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut profiles = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            profiles.push(row_to_profile(row));
        }
        Ok(profiles)
    }

    async fn update(&self, entity: &Profile) -> DomainResult<Profile> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let boosters = serde_json::to_string(&entity.boosters)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let changed = conn
            .execute(
                "UPDATE profiles SET name = ?, background = ?, boosters = ? WHERE id = ?",
                params![entity.name, entity.background, boosters, entity.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Profile {} not found",
                entity.id
            )));
        }

        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM profiles WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Convert a database row to a Profile
fn row_to_profile(row: &Row) -> Profile {
    let raw_boosters: String = row.get(3).unwrap_or_else(|_| "[]".to_string());
    Profile {
        id: row.get(0).unwrap_or(0),
        name: row.get(1).unwrap_or_default(),
        background: row.get(2).ok(),
        boosters: serde_json::from_str(&raw_boosters).unwrap_or_default(),
    }
}
