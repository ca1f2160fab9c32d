//! Command definitions
//!
//! The operations a caller can issue against a slotdb file, and what each
//! one hands back.

use crate::record::Record;
use crate::storage::OpenMode;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Create,
    Get,
    Set,
    Delete,
    List,
    Find,
    Resize,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new file of empty slots
    Create {
        max_field_bytes: usize,
        capacity: usize,
    },

    /// Get an occupied record by id
    Get { id: usize },

    /// Fill an empty slot
    Set {
        id: usize,
        name: String,
        email: String,
    },

    /// Empty a slot
    Delete { id: usize },

    /// All occupied records
    List,

    /// Occupied records matching a search prefix
    Find { term: String },

    /// Change the field cap and slot count
    Resize {
        max_field_bytes: usize,
        capacity: usize,
    },
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Create { .. } => CommandType::Create,
            Command::Get { .. } => CommandType::Get,
            Command::Set { .. } => CommandType::Set,
            Command::Delete { .. } => CommandType::Delete,
            Command::List => CommandType::List,
            Command::Find { .. } => CommandType::Find,
            Command::Resize { .. } => CommandType::Resize,
        }
    }

    /// Whether the table must be persisted after this command
    pub fn is_mutating(&self) -> bool {
        matches!(
            self.command_type(),
            CommandType::Create | CommandType::Set | CommandType::Delete | CommandType::Resize
        )
    }

    /// How the file must be opened to run this command
    pub fn open_mode(&self) -> OpenMode {
        match self {
            Command::Create { .. } => OpenMode::Create,
            _ => OpenMode::ReadWrite,
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A fresh file was written
    Created {
        max_field_bytes: usize,
        capacity: usize,
    },

    /// The record `Get` found
    Record(Record),

    /// The record `Set` stored, after truncation
    Stored(Record),

    /// Zero or more records (from `List` or `Find`)
    Records(Vec<Record>),

    /// A slot was emptied (or already was)
    Deleted { id: usize },

    /// The table now has this shape
    Resized {
        max_field_bytes: usize,
        capacity: usize,
    },
}

impl Outcome {
    /// Records to print, if any
    pub fn records(&self) -> &[Record] {
        match self {
            Outcome::Record(record) => std::slice::from_ref(record),
            Outcome::Records(records) => records,
            _ => &[],
        }
    }
}
