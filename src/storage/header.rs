//! File header
//!
//! The two integers that give every slot its size and the file its length.

use bytes::{Buf, BufMut};

use crate::error::{Result, SlotError};
use crate::record::encoded_len;

/// MaxFieldBytes (4) + Capacity (4)
pub const HEADER_LEN: usize = 8;

/// Table shape as recorded at the start of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub max_field_bytes: usize,
    pub capacity: usize,
}

impl Header {
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        buf.put_u32_le(self.max_field_bytes as u32);
        buf.put_u32_le(self.capacity as u32);
    }

    /// Decode and validate a header; both values must be positive
    pub fn decode(bytes: &[u8; HEADER_LEN]) -> Result<Self> {
        let mut buf = &bytes[..];
        let max_field_bytes = buf.get_u32_le() as usize;
        let capacity = buf.get_u32_le() as usize;

        if max_field_bytes == 0 || capacity == 0 {
            return Err(SlotError::Corrupt(format!(
                "invalid header: max_field_bytes={}, capacity={}",
                max_field_bytes, capacity
            )));
        }

        Ok(Self {
            max_field_bytes,
            capacity,
        })
    }

    /// Smallest possible file for this shape (every slot empty)
    pub fn min_file_len(&self) -> u64 {
        HEADER_LEN as u64 + (self.capacity as u64) * encoded_len(false, self.max_field_bytes) as u64
    }
}
