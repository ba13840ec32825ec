//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is opened
//! in the background after startup; until then every repository call
//! reports "Database not initialized".

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

/// Shared connection handle used by every repository
pub type DbConn = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone)]
pub struct DbState {
    pub conn: DbConn,
}

impl DbState {
    /// Create an empty state; the connection is installed by `init_db`
    pub fn new() -> Self {
        Self {
            conn: Arc::new(Mutex::new(None)),
        }
    }
}

impl Default for DbState {
    fn default() -> Self {
        Self::new()
    }
}

/// Open the database at `db_path`, run migrations, and install the
/// connection into `state`.
pub async fn init_db(state: &DbState, db_path: &Path) -> Result<(), String> {
    let conn = if db_path.to_str() == Some(":memory:") {
        Connection::open_in_memory().map_err(|e| format!("Failed to open db: {}", e))?
    } else {
        Connection::open(db_path).map_err(|e| format!("Failed to open db: {}", e))?
    };

    run_migrations(&conn)?;

    *state.conn.lock().await = Some(conn);
    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS jumps (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            world TEXT NOT NULL DEFAULT '',
            status TEXT NOT NULL DEFAULT '',
            budget INTEGER NOT NULL DEFAULT 1000,
            cp_spent INTEGER NOT NULL DEFAULT 0,
            cp_income INTEGER NOT NULL DEFAULT 0,
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS jump_assets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            jump_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            asset_type TEXT NOT NULL DEFAULT 'perk',
            cost INTEGER NOT NULL DEFAULT 0,
            quantity INTEGER NOT NULL DEFAULT 1,
            discount INTEGER NOT NULL DEFAULT 0,
            freebie INTEGER NOT NULL DEFAULT 0,
            category TEXT NOT NULL DEFAULT '',
            metadata TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_assets_jump ON jump_assets(jump_id);

        CREATE TABLE IF NOT EXISTS inventory_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            quantity INTEGER NOT NULL DEFAULT 1,
            scope TEXT NOT NULL DEFAULT 'warehouse',
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            background TEXT,
            boosters TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS chapters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            jump_id INTEGER,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            position INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            allow_gauntlet INTEGER NOT NULL DEFAULT 1,
            gauntlet_halved INTEGER NOT NULL DEFAULT 0,
            separator TEXT NOT NULL DEFAULT 'none'
        );

        INSERT OR IGNORE INTO settings (id) VALUES (1);",
    )
    .map_err(|e| e.to_string())?;

    // Additive migration: imported chapters keep their source content hash
    if !column_exists(conn, "chapters", "source_hash") {
        conn.execute("ALTER TABLE chapters ADD COLUMN source_hash TEXT", [])
            .map_err(|e| format!("Failed to add source_hash: {}", e))?;
    }

    Ok(())
}
