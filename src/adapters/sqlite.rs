use crate::core::{
    Lot, LotId, LotRepository, LotSeed, LotStore, NewLot, NewSpace, Result, SeedReport, Space,
    SpaceStatus,
};
use crate::utils::error::ParkingError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS parking_lot (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    total_spaces INTEGER NOT NULL,
    free_spaces INTEGER NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS parking_space (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    lot_id INTEGER NOT NULL REFERENCES parking_lot(id) ON DELETE CASCADE,
    space_number TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'free' CHECK (status IN ('free', 'occupied')),
    row_no INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_parking_space_lot
    ON parking_space(lot_id, space_number);
";

const LOT_COLUMNS: &str = "id, name, total_spaces, free_spaces, is_active, created_at";
const SPACE_COLUMNS: &str = "id, lot_id, space_number, status, row_no";

/// SQLite-backed store. One connection, serialized behind a mutex; every
/// query runs on tokio's blocking pool.
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!("Opened SQLite database at {}", path.as_ref().display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Round-trips a trivial query; used at startup before binding.
    pub async fn ping(&self) -> Result<()> {
        self.with_conn(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await?;
        Ok(())
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut conn = conn.lock().map_err(|_| ParkingError::StorageUnavailable {
                message: "SQLite connection lock poisoned".to_string(),
            })?;
            Ok(f(&mut *conn)?)
        })
        .await
        .map_err(|e| ParkingError::StorageUnavailable {
            message: format!("SQLite task failed: {e}"),
        })?
    }
}

fn lot_from_row(row: &Row<'_>) -> rusqlite::Result<Lot> {
    Ok(Lot {
        id: row.get(0)?,
        name: row.get(1)?,
        total_spaces: row.get(2)?,
        free_spaces: row.get(3)?,
        is_active: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn space_from_row(row: &Row<'_>) -> rusqlite::Result<Space> {
    let status: String = row.get(3)?;
    let status = status
        .parse::<SpaceStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Space {
        id: row.get(0)?,
        lot_id: row.get(1)?,
        space_number: row.get(2)?,
        status,
        row: row.get(4)?,
    })
}

fn insert_lot(
    conn: &Connection,
    lot: &NewLot,
    created_at: DateTime<Utc>,
) -> rusqlite::Result<LotId> {
    conn.execute(
        "INSERT INTO parking_lot (name, total_spaces, free_spaces, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            lot.name,
            lot.total_spaces,
            lot.free_spaces,
            lot.is_active,
            created_at
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_space(conn: &Connection, lot_id: LotId, space: &NewSpace) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO parking_space (lot_id, space_number, status, row_no)
         VALUES (?1, ?2, ?3, ?4)",
        params![lot_id, space.space_number, space.status.as_str(), space.row],
    )?;
    Ok(conn.last_insert_rowid())
}

#[async_trait]
impl LotRepository for SqliteRepository {
    async fn list_active(&self) -> Result<Vec<Lot>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LOT_COLUMNS} FROM parking_lot WHERE is_active = 1 ORDER BY id"
            ))?;
            let lots = stmt
                .query_map([], lot_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(lots)
        })
        .await
    }

    async fn get_by_id(&self, id: LotId) -> Result<Option<Lot>> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {LOT_COLUMNS} FROM parking_lot WHERE id = ?1"),
                params![id],
                lot_from_row,
            )
            .optional()
        })
        .await
    }

    async fn list_spaces_for_lot(&self, id: LotId) -> Result<Vec<Space>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {SPACE_COLUMNS} FROM parking_space
                 WHERE lot_id = ?1
                 ORDER BY space_number, id"
            ))?;
            let spaces = stmt
                .query_map(params![id], space_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(spaces)
        })
        .await
    }
}

#[async_trait]
impl LotStore for SqliteRepository {
    async fn create_lot(&self, lot: NewLot) -> Result<Lot> {
        let created_at = Utc::now();
        self.with_conn(move |conn| {
            let id = insert_lot(conn, &lot, created_at)?;
            Ok(Lot {
                id,
                name: lot.name,
                total_spaces: lot.total_spaces,
                free_spaces: lot.free_spaces,
                is_active: lot.is_active,
                created_at,
            })
        })
        .await
    }

    async fn create_space(&self, lot_id: LotId, space: NewSpace) -> Result<Space> {
        self.with_conn(move |conn| {
            let exists = conn
                .query_row(
                    "SELECT 1 FROM parking_lot WHERE id = ?1",
                    params![lot_id],
                    |_| Ok(()),
                )
                .optional()?;
            if exists.is_none() {
                return Ok(None);
            }

            let id = insert_space(conn, lot_id, &space)?;
            Ok(Some(Space {
                id,
                lot_id,
                space_number: space.space_number,
                status: space.status,
                row: space.row,
            }))
        })
        .await?
        .ok_or_else(|| ParkingError::not_found(lot_id))
    }

    async fn delete_lot(&self, id: LotId) -> Result<bool> {
        let removed = self
            .with_conn(move |conn| {
                conn.execute("DELETE FROM parking_lot WHERE id = ?1", params![id])
            })
            .await?;
        Ok(removed > 0)
    }

    async fn load(&self, seeds: Vec<LotSeed>, reset: bool) -> Result<SeedReport> {
        let created_at = Utc::now();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let mut report = SeedReport::default();

            if reset {
                report.lots_deleted = tx.execute("DELETE FROM parking_lot", [])?;
            }
            for seed in &seeds {
                let lot_id = insert_lot(&tx, &seed.lot, created_at)?;
                report.lots_created += 1;
                for space in &seed.spaces {
                    insert_space(&tx, lot_id, space)?;
                    report.spaces_created += 1;
                }
            }

            tx.commit()?;
            Ok(report)
        })
        .await
    }
}
