//! Connection Module
//!
//! Ties one `Table` to one open `StorageFile`.
//!
//! ## Responsibilities
//! - Load an existing file or start a fresh table
//! - Run one command at a time, persisting the whole table after any mutation
//! - Release the file handle and the table on every exit path
//!
//! ## Teardown
//! Fields drop in declaration order: the file handle first, then the table
//! and every slot's text. An early `?` return from `open` drops whatever was
//! already built, so there is nothing to release by hand.

use std::path::Path;

use crate::command::{Command, Outcome};
use crate::config::Config;
use crate::error::Result;
use crate::storage::{OpenMode, StorageFile};
use crate::table::Table;

/// An open slotdb file and its in-memory table
#[derive(Debug)]
pub struct Connection {
    /// Open file handle
    file: StorageFile,

    /// Exclusively owned slot array
    table: Table,
}

impl Connection {
    /// Open a connection
    ///
    /// - `Create`: truncates the file and builds an empty table from
    ///   `config.max_field_bytes`/`config.capacity`. Nothing is written
    ///   until `persist`.
    /// - `ReadWrite`: opens an existing file and loads it; the shape comes
    ///   from the file header and the config's shape is ignored.
    pub fn open(path: &Path, mode: OpenMode, config: &Config) -> Result<Self> {
        // Reject a bad shape before the file is truncated
        if mode == OpenMode::Create {
            config.validate()?;
        }

        let mut file = StorageFile::open(path, mode)?.with_sync_on_write(config.sync_on_write);

        let table = match mode {
            OpenMode::Create => {
                tracing::info!(
                    path = %path.display(),
                    max_field_bytes = config.max_field_bytes,
                    capacity = config.capacity,
                    "creating table"
                );
                Table::create(config.max_field_bytes, config.capacity)?
            }
            OpenMode::ReadWrite => file.load()?,
        };

        Ok(Self {
            file,
            table: table.with_match_chars(config.match_chars),
        })
    }

    /// Create a new file (truncating) with the configured shape
    pub fn create(path: &Path, config: &Config) -> Result<Self> {
        Self::open(path, OpenMode::Create, config)
    }

    /// Open and load an existing file
    pub fn open_existing(path: &Path, config: &Config) -> Result<Self> {
        Self::open(path, OpenMode::ReadWrite, config)
    }

    /// Execute a command
    ///
    /// Mutating commands are persisted before this returns.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let mutating = command.is_mutating();
        tracing::debug!(command = ?command.command_type(), "executing");

        let outcome = match command {
            Command::Create {
                max_field_bytes,
                capacity,
            } => {
                // A connection opened in create mode already holds this table
                let fresh = self.table.is_empty()
                    && self.table.max_field_bytes() == max_field_bytes
                    && self.table.capacity() == capacity;
                if !fresh {
                    let match_chars = self.table.match_chars();
                    self.table =
                        Table::create(max_field_bytes, capacity)?.with_match_chars(match_chars);
                }
                Outcome::Created {
                    max_field_bytes,
                    capacity,
                }
            }
            Command::Get { id } => Outcome::Record(self.table.get(id)?.clone()),
            Command::Set { id, name, email } => {
                Outcome::Stored(self.table.set(id, &name, &email)?.clone())
            }
            Command::Delete { id } => {
                self.table.delete(id)?;
                Outcome::Deleted { id }
            }
            Command::List => Outcome::Records(self.table.list().cloned().collect()),
            Command::Find { term } => Outcome::Records(self.table.find(&term).cloned().collect()),
            Command::Resize {
                max_field_bytes,
                capacity,
            } => {
                self.table.resize(max_field_bytes, capacity)?;
                Outcome::Resized {
                    max_field_bytes,
                    capacity,
                }
            }
        };

        if mutating {
            self.persist()?;
        }

        Ok(outcome)
    }

    /// Rewrite the file from the in-memory table
    pub fn persist(&mut self) -> Result<()> {
        self.file.write_all(&self.table)?;
        Ok(())
    }

    /// Close the connection
    ///
    /// Syncs and releases the file handle, then drops the table.
    pub fn close(self) -> Result<()> {
        let Self { file, table } = self;
        file.close()?;
        drop(table);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Direct table access; the caller must `persist` after mutating
    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Run one command against `path`: open, execute, persist if mutating, close
///
/// `Create` takes its shape from the command rather than from `config`.
pub fn run(path: &Path, command: Command, config: &Config) -> Result<Outcome> {
    let config = match &command {
        Command::Create {
            max_field_bytes,
            capacity,
        } => Config {
            max_field_bytes: *max_field_bytes,
            capacity: *capacity,
            ..config.clone()
        },
        _ => config.clone(),
    };

    let mut conn = Connection::open(path, command.open_mode(), &config)?;
    let outcome = conn.execute(command)?;
    conn.close()?;
    Ok(outcome)
}
