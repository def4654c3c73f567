//! Database schema migration management and versioning.
//!
//! Every schema change is a numbered migration applied once, in order, inside
//! a single transaction, and recorded in the `migrations` table. Databases
//! created by earlier releases of the shelter program (which created their
//! tables ad hoc) are brought up to date the same way: each step checks for
//! tables and columns before creating them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use shelter::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("shelter.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::{msg_debug, msg_error, msg_info, msg_success};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change with its version and transformation function.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations, kept in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

fn has_table(tx: &Transaction, table: &str) -> Result<bool> {
    let count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn has_column(tx: &Transaction, table: &str, column: &str) -> Result<bool> {
    let mut stmt = tx.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns.iter().any(|c| c == column))
}

fn add_column(tx: &Transaction, table: &str, column: &str, definition: &str) -> Result<()> {
    if !has_column(tx, table, column)? {
        tx.execute(&format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition), [])?;
    }
    Ok(())
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: animals intake table
        self.add_migration(1, "create_animals", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS animals (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    species TEXT,
                    birth_date TEXT,
                    age_estimated INTEGER NOT NULL DEFAULT 0,
                    arrival_date TEXT,
                    cage_number TEXT,
                    quarantine_until TEXT
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_animals_cage_number ON animals(cage_number)", [])?;
            Ok(())
        });

        // Version 2: adoptions live on the animal row, deletion is a flag
        self.add_migration(2, "add_adoption_and_soft_delete", |tx| {
            add_column(tx, "animals", "deleted", "INTEGER NOT NULL DEFAULT 0")?;
            add_column(tx, "animals", "adopted", "INTEGER NOT NULL DEFAULT 0")?;
            add_column(tx, "animals", "adoption_date", "TEXT")?;
            add_column(tx, "animals", "owner_name", "TEXT")?;
            add_column(tx, "animals", "owner_contact", "TEXT")?;

            // Older releases kept adoptions in their own table
            if has_table(tx, "adoptions")? {
                tx.execute(
                    "UPDATE animals SET
                        adopted = 1,
                        owner_name = (SELECT a.owner_name FROM adoptions a WHERE a.animal_id = animals.id ORDER BY a.id DESC LIMIT 1),
                        owner_contact = (SELECT a.owner_contact FROM adoptions a WHERE a.animal_id = animals.id ORDER BY a.id DESC LIMIT 1),
                        adoption_date = (SELECT a.adoption_date FROM adoptions a WHERE a.animal_id = animals.id ORDER BY a.id DESC LIMIT 1)
                    WHERE adopted = 0 AND id IN (SELECT animal_id FROM adoptions)",
                    [],
                )?;

                // Some releases removed the animal row and kept a snapshot in adoptions
                if has_column(tx, "adoptions", "name")? {
                    tx.execute(
                        "INSERT OR IGNORE INTO animals
                            (id, name, species, birth_date, age_estimated, arrival_date,
                             adopted, adoption_date, owner_name, owner_contact)
                        SELECT a.animal_id, COALESCE(a.name, ''), a.species, a.birth_date,
                               COALESCE(a.age_estimated, 0), a.arrival_date,
                               1, a.adoption_date, a.owner_name, a.owner_contact
                        FROM adoptions a
                        WHERE a.animal_id NOT IN (SELECT id FROM animals)",
                        [],
                    )?;
                }
            }

            tx.execute("CREATE INDEX IF NOT EXISTS idx_animals_state ON animals(deleted, adopted)", [])?;
            Ok(())
        });

        // Version 3: medical events and their attached documents
        self.add_migration(3, "create_medical_events", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS events (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    animal_id INTEGER NOT NULL,
                    type TEXT NOT NULL,
                    date_start TEXT NOT NULL,
                    date_end TEXT,
                    conclusion TEXT,
                    results TEXT,
                    deleted INTEGER NOT NULL DEFAULT 0,
                    FOREIGN KEY (animal_id) REFERENCES animals(id)
                )",
                [],
            )?;
            add_column(tx, "events", "results", "TEXT")?;
            add_column(tx, "events", "deleted", "INTEGER NOT NULL DEFAULT 0")?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS event_docs (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    event_id INTEGER NOT NULL,
                    filename TEXT NOT NULL,
                    FOREIGN KEY (event_id) REFERENCES events(id)
                )",
                [],
            )?;
            // Attachment names are unique per event
            tx.execute(
                "DELETE FROM event_docs WHERE rowid NOT IN (
                    SELECT MIN(rowid) FROM event_docs GROUP BY event_id, filename
                )",
                [],
            )?;
            tx.execute("CREATE UNIQUE INDEX IF NOT EXISTS idx_event_docs_unique ON event_docs(event_id, filename)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_events_animal_id ON events(animal_id)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the database's current version.
    ///
    /// All pending migrations share one transaction: a failure leaves the
    /// schema exactly as it was.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;

        for migration in pending {
            msg_info!(Message::RunningMigration(migration.version, migration.name.to_string()));

            match (migration.up)(&tx) {
                Ok(()) => {
                    tx.execute(
                        "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                        params![migration.version, migration.name],
                    )?;
                    msg_success!(Message::MigrationCompleted(migration.version));
                }
                Err(e) => {
                    msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                    return Err(e);
                }
            }
        }

        tx.commit()?;
        msg_success!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i32 = conn.query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))?;

        Ok(count > 0)
    }

    /// Applied migrations as `(version, name, applied_at)`, oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    /// Forgets migrations newer than `target_version` (debug builds only).
    ///
    /// Only the bookkeeping rows are removed; the schema itself is left as
    /// is, and every migration tolerates being re-applied over it.
    #[cfg(debug_assertions)]
    pub fn rollback_to(&self, conn: &mut Connection, target_version: u32) -> Result<()> {
        let current_version = self.get_current_version(conn)?;

        if target_version >= current_version {
            msg_info!(Message::NothingToRollback);
            return Ok(());
        }

        msg_info!(Message::RollingBack(current_version, target_version));
        conn.execute("DELETE FROM migrations WHERE version > ?1", params![target_version])?;

        msg_success!(Message::RollbackCompleted(target_version));
        Ok(())
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Whether the database is behind the latest registered migration.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
