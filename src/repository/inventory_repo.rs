//! Inventory Repository
//!
//! CRUD over the inventory_items table (warehouse and body-mod locker).

use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::domain::{DomainError, DomainResult, InventoryItem, StorageScope};

use super::db::DbConn;
use super::traits::Repository;

pub struct InventoryRepository {
    conn: DbConn,
}

impl InventoryRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// List items in one storage scope
    pub async fn list_by_scope(&self, scope: StorageScope) -> DomainResult<Vec<InventoryItem>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, category, quantity, scope, notes FROM inventory_items
                 WHERE scope = ? ORDER BY category, name",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![scope.as_str()])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut items = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            items.push(row_to_item(row));
        }
        Ok(items)
    }
}

#[async_trait]
impl Repository<InventoryItem> for InventoryRepository {
    async fn create(&self, entity: &InventoryItem) -> DomainResult<InventoryItem> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO inventory_items (name, category, quantity, scope, notes) VALUES (?, ?, ?, ?, ?)",
            params![
                entity.name,
                entity.category,
                entity.quantity,
                entity.scope.as_str(),
                entity.notes
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut item = entity.clone();
        item.id = conn.last_insert_rowid() as u32;
        Ok(item)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<InventoryItem>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare("SELECT id, name, category, quantity, scope, notes FROM inventory_items WHERE id = ?")
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_item(row)))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> DomainResult<Vec<InventoryItem>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, name, category, quantity, scope, notes FROM inventory_items
                 ORDER BY category, name",
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut rows = stmt
            .query([])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut items = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            items.push(row_to_item(row));
        }
        Ok(items)
    }

    async fn update(&self, entity: &InventoryItem) -> DomainResult<InventoryItem> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn
            .execute(
                "UPDATE inventory_items SET name = ?, category = ?, quantity = ?, scope = ?, notes = ? WHERE id = ?",
                params![
                    entity.name,
                    entity.category,
                    entity.quantity,
                    entity.scope.as_str(),
                    entity.notes,
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Inventory item {} not found",
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

        conn.execute("DELETE FROM inventory_items WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

/// Convert a database row to an InventoryItem
fn row_to_item(row: &Row) -> InventoryItem {
    InventoryItem {
        id: row.get(0).unwrap_or(0),
        name: row.get(1).unwrap_or_default(),
        category: row.get(2).unwrap_or_default(),
        quantity: row.get(3).unwrap_or(1),
        scope: StorageScope::from_str(&row.get::<_, String>(4).unwrap_or_default()),
        notes: row.get(5).ok(),
    }
}
