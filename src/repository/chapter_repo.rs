//! Chapter Repository
//!
//! CRUD over the chapters table plus ordered reinsertion and lookup by
//! imported-source content hash (de-duplication for the import pipeline).

use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::domain::{Chapter, DomainError, DomainResult};

use super::db::DbConn;
use super::traits::{OrderedRepository, Repository};

const CHAPTER_COLUMNS: &str =
    "id, jump_id, title, body, position, source_hash, created_at, updated_at";

pub struct ChapterRepository {
    conn: DbConn,
}

impl ChapterRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Find a chapter imported from a file with this content hash
    pub async fn find_by_hash(&self, hash: &str) -> DomainResult<Option<Chapter>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM chapters WHERE source_hash = ?",
                CHAPTER_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![hash])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_chapter(row)))
        } else {
            Ok(None)
        }
    }

    /// List chapters attached to one jump
    pub async fn list_by_jump(&self, jump_id: u32) -> DomainResult<Vec<Chapter>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM chapters WHERE jump_id = ? ORDER BY position ASC",
                CHAPTER_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![jump_id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut chapters = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            chapters.push(row_to_chapter(row));
        }
        Ok(chapters)
    }
}

#[async_trait]
impl Repository<Chapter> for ChapterRepository {
    async fn create(&self, entity: &Chapter) -> DomainResult<Chapter> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM chapters",
                [],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let now = chrono::Local::now().timestamp_millis();

        conn.execute(
            "INSERT INTO chapters (jump_id, title, body, position, source_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.jump_id,
                entity.title,
                entity.body,
                position,
                entity.source_hash,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut chapter = entity.clone();
        chapter.id = conn.last_insert_rowid() as u32;
        chapter.position = position;
        chapter.created_at = Some(now);
        chapter.updated_at = Some(now);
        Ok(chapter)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Chapter>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM chapters WHERE id = ?",
                CHAPTER_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_chapter(row)))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> DomainResult<Vec<Chapter>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM chapters ORDER BY position ASC",
                CHAPTER_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut chapters = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            chapters.push(row_to_chapter(row));
        }
        Ok(chapters)
    }

    async fn update(&self, entity: &Chapter) -> DomainResult<Chapter> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let now = chrono::Local::now().timestamp_millis();
        let changed = conn
            .execute(
                "UPDATE chapters SET jump_id = ?, title = ?, body = ?, updated_at = ? WHERE id = ?",
                params![entity.jump_id, entity.title, entity.body, now, entity.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Chapter {} not found",
                entity.id
            )));
        }

        let mut chapter = entity.clone();
        chapter.updated_at = Some(now);
        Ok(chapter)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute("DELETE FROM chapters WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl OrderedRepository<Chapter> for ChapterRepository {
    async fn move_to_index(&self, id: u32, new_index: usize) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut ids: Vec<u32> = {
            let mut stmt = conn
                .prepare("SELECT id FROM chapters ORDER BY position ASC")
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let mut rows = stmt
                .query([])
                .map_err(|e| DomainError::Internal(e.to_string()))?;
            let mut ids = Vec::new();
            while let Ok(Some(row)) = rows.next() {
                ids.push(row.get::<_, u32>(0).unwrap_or(0));
            }
            ids
        };

        let from = ids
            .iter()
            .position(|&cid| cid == id)
            .ok_or_else(|| DomainError::NotFound(format!("Chapter {} not found", id)))?;

        let moved = ids.remove(from);
        let target = new_index.min(ids.len());
        ids.insert(target, moved);

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        for (position, cid) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE chapters SET position = ? WHERE id = ?",
                params![position as i32, cid],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Convert a database row to a Chapter
fn row_to_chapter(row: &Row) -> Chapter {
    Chapter {
        id: row.get(0).unwrap_or(0),
        jump_id: row.get(1).ok(),
        title: row.get(2).unwrap_or_default(),
        body: row.get(3).unwrap_or_default(),
        position: row.get(4).unwrap_or(0),
        source_hash: row.get(5).ok(),
        created_at: row.get(6).ok(),
        updated_at: row.get(7).ok(),
    }
}
