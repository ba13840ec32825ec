//! Jump Repository
//!
//! CRUD over the jumps table plus the chain-level operations: duplicate
//! (jump and all its assets) and splice-and-reinsert reordering with
//! dense positions.

use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::domain::{DomainError, DomainResult, Jump};

use super::db::DbConn;
use super::traits::{OrderedRepository, Repository};

const JUMP_COLUMNS: &str =
    "id, title, world, status, budget, cp_spent, cp_income, position, created_at, updated_at";

pub struct JumpRepository {
    conn: DbConn,
}

impl JumpRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Duplicate a jump together with all of its assets.
    ///
    /// The copy is appended at the end of the chain ordering.
    pub async fn duplicate(&self, id: u32) -> DomainResult<Jump> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let source = query_jump(conn, id)?
            .ok_or_else(|| DomainError::NotFound(format!("Jump {} not found", id)))?;

        let position = next_position(conn)?;
        let now = chrono::Local::now().timestamp_millis();
        let title = format!("{} (copy)", source.title);

        // Jump copy and asset copy land together or not at all
        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.execute(
            "INSERT INTO jumps (title, world, status, budget, cp_spent, cp_income, position, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                title,
                source.world,
                source.status,
                source.budget,
                source.cp_spent,
                source.cp_income,
                position,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let new_id = tx.last_insert_rowid() as u32;

        tx.execute(
            "INSERT INTO jump_assets (jump_id, name, asset_type, cost, quantity, discount, freebie, category, metadata)
             SELECT ?, name, asset_type, cost, quantity, discount, freebie, category, metadata
             FROM jump_assets WHERE jump_id = ?",
            params![new_id, id],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut copy = source;
        copy.id = new_id;
        copy.title = title;
        copy.position = position;
        copy.created_at = Some(now);
        copy.updated_at = Some(now);
        Ok(copy)
    }
}

#[async_trait]
impl Repository<Jump> for JumpRepository {
    async fn create(&self, entity: &Jump) -> DomainResult<Jump> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let position = next_position(conn)?;
        let now = chrono::Local::now().timestamp_millis();

        conn.execute(
            "INSERT INTO jumps (title, world, status, budget, cp_spent, cp_income, position, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.title,
                entity.world,
                entity.status,
                entity.budget,
                entity.cp_spent,
                entity.cp_income,
                position,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut jump = entity.clone();
        jump.id = conn.last_insert_rowid() as u32;
        jump.position = position;
        jump.created_at = Some(now);
        jump.updated_at = Some(now);
        Ok(jump)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Jump>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;
        query_jump(conn, id)
    }

    async fn list(&self) -> DomainResult<Vec<Jump>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM jumps ORDER BY position ASC",
                JUMP_COLUMNS
            ))
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut jumps = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            jumps.push(row_to_jump(row));
        }
        Ok(jumps)
    }

    async fn update(&self, entity: &Jump) -> DomainResult<Jump> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let now = chrono::Local::now().timestamp_millis();
        let changed = conn
            .execute(
                "UPDATE jumps SET title = ?, world = ?, status = ?, budget = ?, cp_spent = ?, cp_income = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    entity.title,
                    entity.world,
                    entity.status,
                    entity.budget,
                    entity.cp_spent,
                    entity.cp_income,
                    now,
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Jump {} not found", entity.id)));
        }

        let mut jump = entity.clone();
        jump.updated_at = Some(now);
        Ok(jump)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.execute("DELETE FROM jump_assets WHERE jump_id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        // Chapters survive their jump; they just lose the association
        tx.execute("UPDATE chapters SET jump_id = NULL WHERE jump_id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.execute("DELETE FROM jumps WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl OrderedRepository<Jump> for JumpRepository {
    async fn move_to_index(&self, id: u32, new_index: usize) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let conn = guard
            .as_mut()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut ids: Vec<u32> = {
            let mut stmt = conn
                .prepare("SELECT id FROM jumps ORDER BY position ASC")
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
            .position(|&jid| jid == id)
            .ok_or_else(|| DomainError::NotFound(format!("Jump {} not found", id)))?;

        // Splice and reinsert, then reassign dense positions
        let moved = ids.remove(from);
        let target = new_index.min(ids.len());
        ids.insert(target, moved);

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        for (position, jid) in ids.iter().enumerate() {
            tx.execute(
                "UPDATE jumps SET position = ? WHERE id = ?",
                params![position as i32, jid],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        }
        tx.commit().map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

fn next_position(conn: &rusqlite::Connection) -> DomainResult<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(position), -1) + 1 FROM jumps",
        [],
        |row| row.get(0),
    )
    .map_err(|e| DomainError::Internal(e.to_string()))
}

fn query_jump(conn: &rusqlite::Connection, id: u32) -> DomainResult<Option<Jump>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {} FROM jumps WHERE id = ?", JUMP_COLUMNS))
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let mut rows = stmt
        .query(params![id])
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    if let Ok(Some(row)) = rows.next() {
        Ok(Some(row_to_jump(row)))
    } else {
        Ok(None)
    }
}

/// Convert a database row to a Jump
fn row_to_jump(row: &Row) -> Jump {
    Jump {
        id: row.get(0).unwrap_or(0),
        title: row.get(1).unwrap_or_default(),
        world: row.get(2).unwrap_or_default(),
        status: row.get(3).unwrap_or_default(),
        budget: row.get(4).unwrap_or(0),
        cp_spent: row.get(5).unwrap_or(0),
        cp_income: row.get(6).unwrap_or(0),
        position: row.get(7).unwrap_or(0),
        created_at: row.get(8).ok(),
        updated_at: row.get(9).ok(),
    }
}
