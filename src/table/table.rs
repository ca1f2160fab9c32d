//! Table implementation
//!
//! Fixed-length `Vec<Record>` indexed directly by id.

use crate::config::DEFAULT_MATCH_CHARS;
use crate::error::{Result, SlotError};
use crate::record::Record;

use super::{Find, Iter};

/// In-memory slot array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Byte cap for each text field, terminator included
    max_field_bytes: usize,

    /// One record per slot; `slots.len()` is the capacity
    slots: Vec<Record>,

    /// Leading characters of a search term that `find` compares
    match_chars: usize,
}

impl Table {
    /// Create a table of `capacity` empty slots
    pub fn create(max_field_bytes: usize, capacity: usize) -> Result<Self> {
        check_shape(max_field_bytes, capacity)?;

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.extend((0..capacity).map(Record::empty));

        Ok(Self {
            max_field_bytes,
            slots,
            match_chars: DEFAULT_MATCH_CHARS,
        })
    }

    /// Rebuild a table from decoded slots
    ///
    /// Fails with `Corrupt` if any slot's id differs from its position.
    pub fn from_slots(max_field_bytes: usize, slots: Vec<Record>) -> Result<Self> {
        check_shape(max_field_bytes, slots.len())?;

        if let Some((pos, record)) = slots
            .iter()
            .enumerate()
            .find(|(pos, record)| record.id != *pos)
        {
            return Err(SlotError::Corrupt(format!(
                "slot {} carries id {}",
                pos, record.id
            )));
        }

        Ok(Self {
            max_field_bytes,
            slots,
            match_chars: DEFAULT_MATCH_CHARS,
        })
    }

    /// Set how many leading characters `find` compares
    pub fn with_match_chars(mut self, match_chars: usize) -> Self {
        self.match_chars = match_chars;
        self
    }

    /// Get an occupied record by id
    pub fn get(&self, id: usize) -> Result<&Record> {
        let record = self.slot(id)?;
        if !record.present {
            return Err(SlotError::NotFound(id));
        }
        Ok(record)
    }

    /// Store `name` and `email` in an empty slot
    ///
    /// Refuses to overwrite: an occupied slot must be deleted first, and is
    /// left untouched when this fails.
    pub fn set(&mut self, id: usize, name: &str, email: &str) -> Result<&Record> {
        let max_field_bytes = self.max_field_bytes;
        let record = self.slot_mut(id)?;
        if record.present {
            return Err(SlotError::AlreadySet(id));
        }

        *record = Record::occupied(id, name, email, max_field_bytes);
        tracing::debug!(id, "slot set");
        Ok(&*record)
    }

    /// Reset a slot to empty. Deleting an empty slot is a no-op.
    pub fn delete(&mut self, id: usize) -> Result<()> {
        let record = self.slot_mut(id)?;
        if record.present {
            tracing::debug!(id, "slot cleared");
        }
        record.clear();
        Ok(())
    }

    /// Occupied records in ascending id order
    pub fn list(&self) -> Iter<'_> {
        Iter::new(&self.slots)
    }

    /// Occupied records whose name or email starts with the leading
    /// characters of `term`
    ///
    /// Case-sensitive.
    pub fn find<'a>(&'a self, term: &str) -> Find<'a> {
        Find::new(self.list(), term, self.match_chars)
    }

    /// Change the field cap and slot count, keeping what still fits
    ///
    /// Surviving text is re-truncated to the new cap. New slots are empty;
    /// slots past the new capacity are dropped.
    pub fn resize(&mut self, max_field_bytes: usize, capacity: usize) -> Result<()> {
        check_shape(max_field_bytes, capacity)?;

        let old_capacity = self.slots.len();
        if capacity > old_capacity {
            self.slots.try_reserve_exact(capacity - old_capacity)?;
            self.slots.extend((old_capacity..capacity).map(Record::empty));
        } else {
            self.slots.truncate(capacity);
            self.slots.shrink_to_fit();
        }

        if max_field_bytes < self.max_field_bytes {
            for record in self.slots.iter_mut().filter(|r| r.present) {
                record.truncate_fields(max_field_bytes);
            }
        }

        tracing::info!(
            from_capacity = old_capacity,
            to_capacity = capacity,
            from_max_field_bytes = self.max_field_bytes,
            to_max_field_bytes = max_field_bytes,
            "table resized"
        );
        self.max_field_bytes = max_field_bytes;
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_field_bytes(&self) -> usize {
        self.max_field_bytes
    }

    pub fn match_chars(&self) -> usize {
        self.match_chars
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.list().count()
    }

    pub fn is_empty(&self) -> bool {
        self.list().next().is_none()
    }

    /// Every slot, occupied or not, in id order
    pub fn slots(&self) -> &[Record] {
        &self.slots
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn slot(&self, id: usize) -> Result<&Record> {
        let capacity = self.slots.len();
        self.slots
            .get(id)
            .ok_or(SlotError::OutOfRange { id, capacity })
    }

    fn slot_mut(&mut self, id: usize) -> Result<&mut Record> {
        let capacity = self.slots.len();
        self.slots
            .get_mut(id)
            .ok_or(SlotError::OutOfRange { id, capacity })
    }
}

fn check_shape(max_field_bytes: usize, capacity: usize) -> Result<()> {
    if max_field_bytes == 0 || capacity == 0 {
        return Err(SlotError::Usage(format!(
            "max_field_bytes and capacity must be positive (got {} and {})",
            max_field_bytes, capacity
        )));
    }
    if max_field_bytes > u32::MAX as usize || capacity > u32::MAX as usize {
        return Err(SlotError::Usage(format!(
            "max_field_bytes and capacity must fit in 32 bits (got {} and {})",
            max_field_bytes, capacity
        )));
    }
    Ok(())
}
