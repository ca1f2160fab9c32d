//! Configuration for slotdb
//!
//! Centralized configuration with sensible defaults.

use crate::error::{Result, SlotError};

/// Default per-field byte cap, terminator included
pub const DEFAULT_MAX_FIELD_BYTES: usize = 512;

/// Default number of slots in a freshly created table
pub const DEFAULT_CAPACITY: usize = 100;

/// Default number of leading characters `find` compares
pub const DEFAULT_MATCH_CHARS: usize = 3;

/// Main configuration for a slotdb connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Table Shape (create mode only; existing files carry their own header)
    // -------------------------------------------------------------------------
    /// Byte cap for each text field, including room for the terminator
    pub max_field_bytes: usize,

    /// Number of slots
    pub capacity: usize,

    // -------------------------------------------------------------------------
    // Search Configuration
    // -------------------------------------------------------------------------
    /// How many leading characters of a search term are compared
    pub match_chars: usize,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// fsync the file after every full rewrite
    pub sync_on_write: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_field_bytes: DEFAULT_MAX_FIELD_BYTES,
            capacity: DEFAULT_CAPACITY,
            match_chars: DEFAULT_MATCH_CHARS,
            sync_on_write: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject shapes no table can have
    pub fn validate(&self) -> Result<()> {
        if self.max_field_bytes == 0 {
            return Err(SlotError::Usage(
                "max_field_bytes must be greater than zero".to_string(),
            ));
        }
        if self.capacity == 0 {
            return Err(SlotError::Usage(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_field_bytes > u32::MAX as usize || self.capacity > u32::MAX as usize {
            return Err(SlotError::Usage(format!(
                "max_field_bytes and capacity must fit in 32 bits (got {} and {})",
                self.max_field_bytes, self.capacity
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-field byte cap
    pub fn max_field_bytes(mut self, bytes: usize) -> Self {
        self.config.max_field_bytes = bytes;
        self
    }

    /// Set the slot count
    pub fn capacity(mut self, slots: usize) -> Self {
        self.config.capacity = slots;
        self
    }

    /// Set how many leading characters `find` compares
    pub fn match_chars(mut self, chars: usize) -> Self {
        self.config.match_chars = chars;
        self
    }

    /// Enable or disable fsync after each write
    pub fn sync_on_write(mut self, sync: bool) -> Self {
        self.config.sync_on_write = sync;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
