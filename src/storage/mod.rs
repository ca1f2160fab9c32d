//! Storage Module
//!
//! Owns the on-disk layout of a slotdb file.
//!
//! ## Responsibilities
//! - Open a file for creation (truncating) or for read-write (existing only)
//! - Read the header, then every slot it declares
//! - Rewrite the whole file from a `Table` on every persist
//!
//! ## File Format
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ Header (8 bytes)                           │
//! │ ┌────────────────────┬───────────────────┐ │
//! │ │ MaxFieldBytes (4)  │  Capacity (4)     │ │
//! │ └────────────────────┴───────────────────┘ │
//! ├────────────────────────────────────────────┤
//! │ Slots (capacity times, in id order)        │
//! │ ┌────────┬─────────────┬──────┬─────────┐  │
//! │ │ ID (4) │ Present (4) │ Name │  Email  │  │
//! │ └────────┴─────────────┴──────┴─────────┘  │
//! │ (Name/Email present only when Present = 1) │
//! └────────────────────────────────────────────┘
//! ```
//! All integers are little-endian.

mod file;
mod header;

pub use file::StorageFile;
pub use header::{Header, HEADER_LEN};

/// How a storage file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create the file, truncating any existing content
    Create,

    /// Open an existing file without truncating it
    ReadWrite,
}
