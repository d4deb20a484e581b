//! Durable reference table storage
//!
//! SQLite-backed persistence for the reference table. The contract is
//! replace-all semantics: [`SqliteStore::replace_all`] swaps the stored
//! table for a new snapshot inside one transaction, so a reader never
//! observes a partially cleared table. Classification itself never touches
//! the store; it runs against an in-memory [`ReferenceTable`] snapshot.

use std::path::Path;

use log::info;
use rusqlite::{params, Connection, Row};

use crate::color::Rgb;
use crate::error::Result;
use crate::reference::{ReferenceEntry, ReferenceTable};

/// SQLite store holding one reference table
pub struct SqliteStore {
    conn: Connection,
}

fn row_to_entry(row: &Row) -> rusqlite::Result<ReferenceEntry> {
    Ok(ReferenceEntry {
        pad_index: row.get("pad_index")?,
        analyte_code: row.get("analyte_code")?,
        level_index: row.get::<_, i64>("level_index")? as usize,
        value_label: row.get("value_label")?,
        color: Rgb::new(row.get("r_mean")?, row.get("g_mean")?, row.get("b_mean")?),
    })
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Replace the stored table with a new snapshot.
    ///
    /// Drop, recreate and bulk insert run inside a single transaction, so
    /// the destructive rebuild is atomic from any reader's perspective.
    pub fn replace_all(&mut self, table: &ReferenceTable) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute("DROP TABLE IF EXISTS color_lookup", [])?;
        tx.execute(
            "CREATE TABLE color_lookup (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pad_index INTEGER NOT NULL,
                analyte_code TEXT NOT NULL,
                level_index INTEGER NOT NULL,
                value_label TEXT NOT NULL,
                r_mean REAL NOT NULL,
                g_mean REAL NOT NULL,
                b_mean REAL NOT NULL,
                UNIQUE (pad_index, level_index)
            )",
            [],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO color_lookup
                 (pad_index, analyte_code, level_index, value_label, r_mean, g_mean, b_mean)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for entry in table.entries() {
                stmt.execute(params![
                    entry.pad_index,
                    entry.analyte_code,
                    entry.level_index as i64,
                    entry.value_label,
                    entry.color.r,
                    entry.color.g,
                    entry.color.b,
                ])?;
            }
        }

        tx.commit()?;
        info!("stored reference table: {} entries", table.len());
        Ok(())
    }

    /// Entries for one pad, in ascending level order
    pub fn query_by_pad(&self, pad_index: u32) -> Result<Vec<ReferenceEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT pad_index, analyte_code, level_index, value_label, r_mean, g_mean, b_mean
             FROM color_lookup
             WHERE pad_index = ?1
             ORDER BY level_index",
        )?;
        let entries = stmt
            .query_map(params![pad_index], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Load the full stored table as an in-memory snapshot
    pub fn load(&self) -> Result<ReferenceTable> {
        let mut stmt = self.conn.prepare(
            "SELECT pad_index, analyte_code, level_index, value_label, r_mean, g_mean, b_mean
             FROM color_lookup
             ORDER BY pad_index, level_index",
        )?;
        let entries = stmt
            .query_map([], row_to_entry)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ReferenceTable::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pad: u32, level: usize, r: f64) -> ReferenceEntry {
        ReferenceEntry {
            pad_index: pad,
            analyte_code: "GLU".to_string(),
            level_index: level,
            value_label: format!("L{}", level),
            color: Rgb::new(r, 0.0, 0.0),
        }
    }

    #[test]
    fn test_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let table = ReferenceTable::new(vec![entry(1, 0, 200.0), entry(1, 1, 150.5)]);
        store.replace_all(&table).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.entries(), table.entries());
    }

    #[test]
    fn test_query_by_pad_ordered_by_level() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let table = ReferenceTable::new(vec![entry(2, 1, 2.0), entry(2, 0, 1.0), entry(1, 0, 0.0)]);
        store.replace_all(&table).unwrap();

        let pad2 = store.query_by_pad(2).unwrap();
        assert_eq!(pad2.len(), 2);
        assert_eq!(pad2[0].level_index, 0);
        assert_eq!(pad2[1].level_index, 1);
    }

    #[test]
    fn test_replace_all_discards_previous_contents() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .replace_all(&ReferenceTable::new(vec![
                entry(1, 0, 1.0),
                entry(1, 1, 2.0),
                entry(2, 0, 3.0),
            ]))
            .unwrap();

        let replacement = ReferenceTable::new(vec![entry(1, 0, 99.0)]);
        store.replace_all(&replacement).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].color.r, 99.0);
        assert!(store.query_by_pad(2).unwrap().is_empty());
    }

    #[test]
    fn test_load_without_table_is_storage_error() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load().is_err());
    }
}
