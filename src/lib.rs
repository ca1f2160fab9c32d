//! # slotdb
//!
//! A single-file, fixed-slot record store with:
//! - A fixed-length array of slots, each holding `id`, presence, `name`, `email`
//! - Bounded text fields that always leave room for a terminator
//! - Whole-file rewrite after every mutation (no partial flush)
//! - In-place resize of both slot count and field cap
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CLI / Command                            │
//! │          (one command per open → execute → close)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Connection                               │
//! │          (owns file handle + table, persists writes)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Storage   │          │    Table    │
//!   │ (full file) │          │(Vec<Record>)│
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │   Record    │
//!   │   Codec     │
//!   └─────────────┘
//! ```
//!
//! Single-process, single-threaded use only; nothing locks the file.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod table;
pub mod command;
pub mod connection;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SlotError};
pub use config::Config;
pub use command::{Command, Outcome};
pub use connection::{run, Connection};
pub use record::Record;
pub use storage::OpenMode;
pub use table::Table;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of slotdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
