//! Table Module
//!
//! In-memory representation of the full slot array.
//!
//! ## Responsibilities
//! - Hold exactly `capacity` slots, slot `i` always carrying id `i`
//! - Create, get, set, delete, list, find and resize over that state
//! - Never touch the file; the connection persists after each mutation
//!
//! ## Slot States
//! ```text
//!            set
//!   Empty ────────▶ Occupied
//!     ▲                │
//!     └────────────────┘
//!           delete
//! ```
//! `resize` adds or drops slots but never flips a surviving slot's state.

mod iter;
mod table;

pub use iter::{Find, Iter};
pub use table::Table;
