//! Jump Asset Repository
//!
//! CRUD over the jump_assets table. Metadata is a JSON column decoded
//! into `AssetMeta` at this boundary.

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};

use crate::domain::{AssetMeta, AssetType, DomainError, DomainResult, JumpAsset};

use super::db::DbConn;
use super::traits::Repository;

const ASSET_COLUMNS: &str =
    "id, jump_id, name, asset_type, cost, quantity, discount, freebie, category, metadata";

pub struct AssetRepository {
    conn: DbConn,
}

impl AssetRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// List all assets belonging to one jump
    pub async fn list_by_jump(&self, jump_id: u32) -> DomainResult<Vec<JumpAsset>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        query_assets(
            conn,
            &format!(
                "SELECT {} FROM jump_assets WHERE jump_id = ? ORDER BY id ASC",
                ASSET_COLUMNS
            ),
            params![jump_id],
        )
    }

    /// List all assets of one type across every jump
    pub async fn list_by_type(&self, asset_type: AssetType) -> DomainResult<Vec<JumpAsset>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        query_assets(
            conn,
            &format!(
                "SELECT {} FROM jump_assets WHERE asset_type = ? ORDER BY jump_id, id ASC",
                ASSET_COLUMNS
            ),
            params![asset_type.as_str()],
        )
    }
}

#[async_trait]
impl Repository<JumpAsset> for AssetRepository {
    async fn create(&self, entity: &JumpAsset) -> DomainResult<JumpAsset> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        conn.execute(
            "INSERT INTO jump_assets (jump_id, name, asset_type, cost, quantity, discount, freebie, category, metadata)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.jump_id,
                entity.name,
                entity.asset_type.as_str(),
                entity.cost,
                entity.quantity,
                entity.discount as i32,
                entity.freebie as i32,
                entity.category,
                entity.metadata.encode()
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut asset = entity.clone();
        asset.id = conn.last_insert_rowid() as u32;
        Ok(asset)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<JumpAsset>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let assets = query_assets(
            conn,
            &format!("SELECT {} FROM jump_assets WHERE id = ?", ASSET_COLUMNS),
            params![id],
        )?;
        Ok(assets.into_iter().next())
    }

    async fn list(&self) -> DomainResult<Vec<JumpAsset>> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        query_assets(
            conn,
            &format!(
                "SELECT {} FROM jump_assets ORDER BY jump_id, id ASC",
                ASSET_COLUMNS
            ),
            params![],
        )
    }

    async fn update(&self, entity: &JumpAsset) -> DomainResult<JumpAsset> {
        let guard = self.conn.lock().await;
        let conn = guard
            .as_ref()
            .ok_or(DomainError::Internal("Database not initialized".to_string()))?;

        let changed = conn
            .execute(
                "UPDATE jump_assets SET jump_id = ?, name = ?, asset_type = ?, cost = ?, quantity = ?, discount = ?, freebie = ?, category = ?, metadata = ?
                 WHERE id = ?",
                params![
                    entity.jump_id,
                    entity.name,
                    entity.asset_type.as_str(),
                    entity.cost,
                    entity.quantity,
                    entity.discount as i32,
                    entity.freebie as i32,
                    entity.category,
                    entity.metadata.encode(),
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Asset {} not found",
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

        conn.execute("DELETE FROM jump_assets WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(())
    }
}

fn query_assets<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> DomainResult<Vec<JumpAsset>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let mut rows = stmt
        .query(params)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let mut assets = Vec::new();
    while let Ok(Some(row)) = rows.next() {
        assets.push(row_to_asset(row));
    }
    Ok(assets)
}

/// Convert a database row to a JumpAsset
fn row_to_asset(row: &Row) -> JumpAsset {
    let raw_meta: Option<String> = row.get(9).ok();
    JumpAsset {
        id: row.get(0).unwrap_or(0),
        jump_id: row.get(1).unwrap_or(0),
        name: row.get(2).unwrap_or_default(),
        asset_type: AssetType::from_str(&row.get::<_, String>(3).unwrap_or_default()),
        cost: row.get(4).unwrap_or(0),
        quantity: row.get(5).unwrap_or(1),
        discount: row.get::<_, i32>(6).unwrap_or(0) != 0,
        freebie: row.get::<_, i32>(7).unwrap_or(0) != 0,
        category: row.get(8).unwrap_or_default(),
        metadata: AssetMeta::decode(raw_meta.as_deref()),
    }
}
