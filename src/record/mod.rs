//! Record Module
//!
//! The logical entity held by a slot, plus the bounded-text rule every
//! stored field obeys.
//!
//! ## Responsibilities
//! - Represent one slot's content (`id`, presence, `name`, `email`)
//! - Truncate text to fit a field cap with room for the terminator
//! - Encode/decode a single slot (see [`codec`])

pub mod codec;

use std::fmt;

pub use codec::{decode, encode, encode_into, encoded_len, write_to, SLOT_PREFIX_LEN};

/// One slot's content
///
/// An empty slot is still a `Record`: `present == false` with empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Positional slot index
    pub id: usize,

    /// Whether the slot holds data
    pub present: bool,

    pub name: String,

    pub email: String,
}

impl Record {
    /// The canonical empty record for slot `id`
    pub fn empty(id: usize) -> Self {
        Self {
            id,
            present: false,
            name: String::new(),
            email: String::new(),
        }
    }

    /// An occupied record with both fields truncated to `max_field_bytes`
    pub fn occupied(id: usize, name: &str, email: &str, max_field_bytes: usize) -> Self {
        Self {
            id,
            present: true,
            name: bounded(name, max_field_bytes).to_string(),
            email: bounded(email, max_field_bytes).to_string(),
        }
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Reset to the canonical empty record, releasing the text buffers
    pub(crate) fn clear(&mut self) {
        *self = Record::empty(self.id);
    }

    /// Re-apply the field cap in place (used when the cap shrinks)
    pub(crate) fn truncate_fields(&mut self, max_field_bytes: usize) {
        let name_len = bounded(&self.name, max_field_bytes).len();
        self.name.truncate(name_len);
        let email_len = bounded(&self.email, max_field_bytes).len();
        self.email.truncate(email_len);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.name, self.email)
    }
}

/// The longest prefix of `text` that fits a field of `max_field_bytes`
///
/// The result is at most `max_field_bytes - 1` bytes so a terminator always
/// fits, stops at the first NUL, and never splits a UTF-8 character.
pub fn bounded(text: &str, max_field_bytes: usize) -> &str {
    let text = match text.find('\0') {
        Some(nul) => &text[..nul],
        None => text,
    };

    let limit = max_field_bytes.saturating_sub(1);
    if text.len() <= limit {
        return text;
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
