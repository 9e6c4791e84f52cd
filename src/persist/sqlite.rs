//! SQLite-backed snapshot store.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::service::{Inventory, InventoryConfig, InventorySnapshotV1};

use super::{LoadReport, PersistError, PersistResult, SnapshotStore};

/// Version number for serialized snapshot payloads.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Row id of a stored snapshot.
pub type SnapshotId = i64;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEnvelope {
    format_version: u16,
    snapshot: InventorySnapshotV1,
}

/// Keeps whole-inventory snapshots, including the undo stack, in SQLite.
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Snapshot database at `path`, created with its table if missing.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        Self::prepare(Connection::open(path)?)
    }

    /// Throwaway database that lives as long as the returned value.
    pub fn open_in_memory() -> PersistResult<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    // WAL with NORMAL sync: a crash can lose the newest snapshot only.
    fn prepare(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        for (pragma, value) in [("journal_mode", "WAL"), ("synchronous", "NORMAL")] {
            conn.pragma_update(None, pragma, value)?;
        }
        Ok(Self { conn })
    }

    /// Appends a snapshot and returns its id.
    pub fn write_snapshot(&mut self, snapshot: &InventorySnapshotV1) -> PersistResult<SnapshotId> {
        let env = SnapshotEnvelope {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot: snapshot.clone(),
        };
        let payload = serde_json::to_vec(&env)?;
        self.conn.execute(
            "INSERT INTO snapshots(ts_ms, record_count, undo_depth, payload) VALUES (?1, ?2, ?3, ?4)",
            params![
                now_ms() as i64,
                snapshot.records.len() as i64,
                snapshot.undo.len() as i64,
                payload
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, records = snapshot.records.len(), "snapshot written");
        Ok(id)
    }

    /// Most recent snapshot, if any has been written.
    pub fn load_latest_snapshot(&self) -> PersistResult<Option<InventorySnapshotV1>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT payload FROM snapshots ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(None);
        };

        decode_snapshot_payload(&payload).map(Some)
    }

    /// Builds an inventory from the latest snapshot, or an empty one.
    pub fn load_inventory(&self, config: &InventoryConfig) -> PersistResult<Inventory> {
        match self.load_latest_snapshot()? {
            Some(snapshot) => Ok(Inventory::from_snapshot(snapshot, config)?),
            None => Ok(Inventory::with_config(config)),
        }
    }

    /// Deletes snapshots up to and including `id`. Returns how many went.
    pub fn prune_through(&mut self, id: SnapshotId) -> PersistResult<usize> {
        let count = self
            .conn
            .execute("DELETE FROM snapshots WHERE id <= ?1", params![id])?;
        Ok(count)
    }

    /// Id of the newest snapshot, or 0 when none exist.
    pub fn latest_snapshot_id(&self) -> PersistResult<SnapshotId> {
        let id: Option<i64> = self
            .conn
            .query_row("SELECT MAX(id) FROM snapshots", [], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .optional()?
            .flatten();
        Ok(id.unwrap_or(0))
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self, config: &InventoryConfig) -> PersistResult<(Inventory, LoadReport)> {
        let inventory = self.load_inventory(config)?;
        let report = LoadReport {
            loaded: inventory.len(),
            ..LoadReport::default()
        };
        info!(records = report.loaded, "snapshot loaded");
        Ok((inventory, report))
    }

    fn save(&mut self, inventory: &Inventory) -> PersistResult<()> {
        let id = self.write_snapshot(&inventory.export_snapshot())?;
        info!(id, records = inventory.len(), "snapshot saved");
        Ok(())
    }
}

fn now_ms() -> u64 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)
}

fn decode_snapshot_payload(payload: &[u8]) -> PersistResult<InventorySnapshotV1> {
    let SnapshotEnvelope {
        format_version,
        snapshot,
    } = serde_json::from_slice(payload)?;
    match format_version {
        SNAPSHOT_FORMAT_VERSION => Ok(snapshot),
        other => Err(PersistError::Message(format!(
            "snapshot written by format {other}, this build reads {SNAPSHOT_FORMAT_VERSION}"
        ))),
    }
}
