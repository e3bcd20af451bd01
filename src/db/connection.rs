//! Connection bootstrap helpers: open a file, the default per-user database,
//! or an in-memory store for tests, with the schema ensured before the
//! connection is handed out.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::info;
use rusqlite::Connection;

use super::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".roster-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "players.sqlite";

/// Open (creating if necessary) the database at `path` and ensure the schema
/// exists. The connection is held for the store's lifetime; the design
/// assumes exactly one active writer at a time.
pub fn open(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| StoreError::new(format!("failed to create data directory: {err}")))?;
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!("opened player database at {}", path.display());
    Ok(conn)
}

/// Open the database at its default location inside the user's home
/// directory.
pub fn open_default() -> Result<Connection, StoreError> {
    open(default_db_path()?)
}

/// Open a fresh in-memory database with the schema applied. Used by tests and
/// by callers that want a throwaway roster.
pub fn open_in_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Resolve the absolute path of the default SQLite database inside the user's
/// home.
pub fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs =
        BaseDirs::new().ok_or_else(|| StoreError::new("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}

/// Create the single roster table if it does not exist. The schema only
/// enforces non-null on the six business columns; the richer invariants
/// (non-empty name, non-future birth date) live at the validation boundary.
fn ensure_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS players (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            birth_date TEXT NOT NULL,
            team TEXT NOT NULL,
            home_city TEXT NOT NULL,
            squad TEXT NOT NULL,
            position TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}
