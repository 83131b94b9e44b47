//! Row storage for inventory entries.
//!
//! Every value reaches SQL as a positional parameter.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::entry::InventoryEntry;
use crate::error::InventoryError;
use crate::item::ItemId;

/// Typed repository over the `Inventories` table.
pub trait InventoryStore: Send + Sync {
    /// Create the table if it does not exist yet.
    fn create_table(&self) -> Result<(), InventoryError>;

    /// All entries owned by `owner`, ordered by slot.
    fn find_by_owner(&self, owner: &str) -> Result<Vec<InventoryEntry>, InventoryError>;

    /// Entries owned by `owner` holding `item`, ordered by slot.
    fn find_by_owner_and_item(
        &self,
        owner: &str,
        item: ItemId,
    ) -> Result<Vec<InventoryEntry>, InventoryError>;

    fn insert(&self, entry: &InventoryEntry) -> Result<(), InventoryError>;

    fn update_quantity(&self, owner: &str, slot: i32, quantity: i32)
        -> Result<(), InventoryError>;

    fn update_metadata(
        &self,
        owner: &str,
        slot: i32,
        metadata: Option<&str>,
    ) -> Result<(), InventoryError>;

    fn delete_slot(&self, owner: &str, slot: i32) -> Result<(), InventoryError>;
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS Inventories (
    PlayerName VARCHAR(20),
    Slot INTEGER,
    BlockID INTEGER,
    Quantity INTEGER,
    Metadata VARCHAR(100)
);
CREATE INDEX IF NOT EXISTS idx_inventories_player ON Inventories (PlayerName);";

const SELECT_COLUMNS: &str = "SELECT PlayerName, Slot, BlockID, Quantity, Metadata FROM Inventories";

/// SQLite-backed [`InventoryStore`].
///
/// The connection sits behind a mutex so one store can be shared between
/// threads; each call holds it for a single statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InventoryError> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Opened inventory database at {}", path.as_ref().display());
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, InventoryError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, InventoryError> {
        self.conn.lock().map_err(|_| InventoryError::Poisoned)
    }

    fn query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<InventoryEntry>, InventoryError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, entry_from_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<InventoryEntry> {
    Ok(InventoryEntry {
        owner: row.get(0)?,
        slot: row.get(1)?,
        item: ItemId::from_stored(row.get(2)?),
        quantity: row.get(3)?,
        metadata: row.get(4)?,
    })
}

impl InventoryStore for SqliteStore {
    fn create_table(&self) -> Result<(), InventoryError> {
        self.conn()?.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    fn find_by_owner(&self, owner: &str) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE PlayerName = ?1 ORDER BY Slot"),
            params![owner],
        )
    }

    fn find_by_owner_and_item(
        &self,
        owner: &str,
        item: ItemId,
    ) -> Result<Vec<InventoryEntry>, InventoryError> {
        self.query(
            &format!("{SELECT_COLUMNS} WHERE PlayerName = ?1 AND BlockID = ?2 ORDER BY Slot"),
            params![owner, item.stored()],
        )
    }

    fn insert(&self, entry: &InventoryEntry) -> Result<(), InventoryError> {
        self.conn()?.execute(
            "INSERT INTO Inventories (PlayerName, Slot, BlockID, Quantity, Metadata)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.owner,
                entry.slot,
                entry.item.stored(),
                entry.quantity,
                entry.metadata,
            ],
        )?;
        debug!(
            owner = %entry.owner,
            slot = entry.slot,
            item = %entry.item,
            quantity = entry.quantity,
            "inserted inventory row"
        );
        Ok(())
    }

    fn update_quantity(
        &self,
        owner: &str,
        slot: i32,
        quantity: i32,
    ) -> Result<(), InventoryError> {
        self.conn()?.execute(
            "UPDATE Inventories SET Quantity = ?1 WHERE PlayerName = ?2 AND Slot = ?3",
            params![quantity, owner, slot],
        )?;
        debug!(owner, slot, quantity, "updated inventory quantity");
        Ok(())
    }

    fn update_metadata(
        &self,
        owner: &str,
        slot: i32,
        metadata: Option<&str>,
    ) -> Result<(), InventoryError> {
        self.conn()?.execute(
            "UPDATE Inventories SET Metadata = ?1 WHERE PlayerName = ?2 AND Slot = ?3",
            params![metadata, owner, slot],
        )?;
        debug!(owner, slot, ?metadata, "updated inventory metadata");
        Ok(())
    }

    fn delete_slot(&self, owner: &str, slot: i32) -> Result<(), InventoryError> {
        self.conn()?.execute(
            "DELETE FROM Inventories WHERE PlayerName = ?1 AND Slot = ?2",
            params![owner, slot],
        )?;
        debug!(owner, slot, "deleted inventory row");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.create_table().unwrap();
        store
    }

    #[test]
    fn create_table_is_idempotent() {
        let store = store();
        store.create_table().unwrap();
        assert!(store.find_by_owner("Alice").unwrap().is_empty());
    }

    #[test]
    fn insert_and_find_by_owner() {
        let store = store();
        store
            .insert(&InventoryEntry::new("Alice", 2, ItemId::from_raw(4), 3))
            .unwrap();
        store
            .insert(&InventoryEntry::new("Alice", 1, ItemId::from_raw(100), 1))
            .unwrap();
        store
            .insert(&InventoryEntry::new("Bob", 1, ItemId::from_raw(4), 9))
            .unwrap();

        let alice = store.find_by_owner("Alice").unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].slot, 1);
        assert_eq!(alice[0].item, ItemId::from_raw(100));
        assert_eq!(alice[0].item.stored(), -156);
        assert_eq!(alice[1].quantity, 3);
        assert_eq!(alice[1].metadata, None);
    }

    #[test]
    fn find_by_owner_and_item_filters() {
        let store = store();
        store
            .insert(&InventoryEntry::new("Alice", 1, ItemId::from_raw(4), 3))
            .unwrap();
        store
            .insert(&InventoryEntry::new("Alice", 2, ItemId::from_raw(5), 1))
            .unwrap();
        let found = store
            .find_by_owner_and_item("Alice", ItemId::from_raw(5))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slot, 2);
        assert!(store
            .find_by_owner_and_item("Bob", ItemId::from_raw(5))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn update_and_delete_are_scoped_to_owner_and_slot() {
        let store = store();
        store
            .insert(&InventoryEntry::new("Alice", 1, ItemId::from_raw(4), 3))
            .unwrap();
        store
            .insert(&InventoryEntry::new("Bob", 1, ItemId::from_raw(4), 3))
            .unwrap();

        store.update_quantity("Alice", 1, 10).unwrap();
        store.update_metadata("Alice", 1, Some("level=2")).unwrap();
        let alice = store.find_by_owner("Alice").unwrap();
        assert_eq!(alice[0].quantity, 10);
        assert_eq!(alice[0].metadata.as_deref(), Some("level=2"));
        assert_eq!(store.find_by_owner("Bob").unwrap()[0].quantity, 3);

        store.delete_slot("Alice", 1).unwrap();
        assert!(store.find_by_owner("Alice").unwrap().is_empty());
        assert_eq!(store.find_by_owner("Bob").unwrap().len(), 1);
    }

    #[test]
    fn owner_is_bound_not_interpolated() {
        let store = store();
        store
            .insert(&InventoryEntry::new("Alice", 1, ItemId::from_raw(4), 3))
            .unwrap();
        let hostile = "x' OR '1'='1";
        assert!(store.find_by_owner(hostile).unwrap().is_empty());
        store.delete_slot(hostile, 1).unwrap();
        assert_eq!(store.find_by_owner("Alice").unwrap().len(), 1);
    }

    #[test]
    fn file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.create_table().unwrap();
            store
                .insert(&InventoryEntry::new("Alice", 1, ItemId::from_raw(49), 7))
                .unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        store.create_table().unwrap();
        let rows = store.find_by_owner("Alice").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 7);
    }
}
