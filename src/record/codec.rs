//! Record codec
//!
//! Encoding and decoding of a single slot.
//!
//! ## Slot Format
//! ```text
//! Absent:   ┌─────────┬──────────────┐
//!           │ ID (4)  │ Present=0 (4)│
//!           └─────────┴──────────────┘
//!
//! Present:  ┌─────────┬──────────────┬─────────────────┬─────────────────┐
//!           │ ID (4)  │ Present=1 (4)│ Name (max bytes)│ Email (max bytes)│
//!           └─────────┴──────────────┴─────────────────┴─────────────────┘
//! ```
//! Integers are little-endian. Text fields are NUL-terminated and NUL-padded
//! to exactly `max_field_bytes`.

use std::io::{self, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, SlotError};

use super::{bounded, Record};

/// ID (4) + Present (4)
pub const SLOT_PREFIX_LEN: usize = 8;

const ABSENT: u32 = 0;
const PRESENT: u32 = 1;

/// Padding source for `write_to`
static ZEROS: [u8; 4096] = [0; 4096];

/// On-disk size of a slot
pub fn encoded_len(present: bool, max_field_bytes: usize) -> usize {
    if present {
        SLOT_PREFIX_LEN + 2 * max_field_bytes
    } else {
        SLOT_PREFIX_LEN
    }
}

/// Encode a record to bytes
pub fn encode(record: &Record, max_field_bytes: usize) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(record.present, max_field_bytes));
    encode_into(record, max_field_bytes, &mut buf);
    buf.freeze()
}

/// Encode a record onto the end of `buf`
///
/// Absent records always produce the same 8 bytes, whatever their fields hold.
pub fn encode_into<B: BufMut>(record: &Record, max_field_bytes: usize, buf: &mut B) {
    buf.put_u32_le(record.id as u32);

    if !record.present {
        buf.put_u32_le(ABSENT);
        return;
    }

    buf.put_u32_le(PRESENT);
    put_field(buf, &record.name, max_field_bytes);
    put_field(buf, &record.email, max_field_bytes);
}

fn put_field<B: BufMut>(buf: &mut B, text: &str, max_field_bytes: usize) {
    let stored = bounded(text, max_field_bytes);
    buf.put_slice(stored.as_bytes());
    buf.put_bytes(0, max_field_bytes - stored.len());
}

/// Stream a record to `writer`, returning the bytes written
///
/// Padding goes out in fixed-size chunks, so nothing proportional to
/// `max_field_bytes` is allocated.
pub fn write_to<W: Write>(
    record: &Record,
    max_field_bytes: usize,
    writer: &mut W,
) -> io::Result<u64> {
    let flag = if record.present { PRESENT } else { ABSENT };
    let mut prefix = [0u8; SLOT_PREFIX_LEN];
    prefix[..4].copy_from_slice(&(record.id as u32).to_le_bytes());
    prefix[4..].copy_from_slice(&flag.to_le_bytes());
    writer.write_all(&prefix)?;

    if !record.present {
        return Ok(SLOT_PREFIX_LEN as u64);
    }

    write_field(writer, &record.name, max_field_bytes)?;
    write_field(writer, &record.email, max_field_bytes)?;
    Ok(encoded_len(true, max_field_bytes) as u64)
}

fn write_field<W: Write>(writer: &mut W, text: &str, max_field_bytes: usize) -> io::Result<()> {
    let stored = bounded(text, max_field_bytes);
    writer.write_all(stored.as_bytes())?;

    let mut padding = max_field_bytes - stored.len();
    while padding > 0 {
        let chunk = padding.min(ZEROS.len());
        writer.write_all(&ZEROS[..chunk])?;
        padding -= chunk;
    }
    Ok(())
}

/// Decode a record from bytes
///
/// `bytes` must start at a slot boundary. An absent slot decodes to the
/// canonical empty record no matter what follows its prefix.
pub fn decode(bytes: &[u8], max_field_bytes: usize) -> Result<Record> {
    let mut buf = bytes;

    if buf.remaining() < SLOT_PREFIX_LEN {
        return Err(SlotError::Truncated(format!(
            "slot prefix: expected {} bytes, got {}",
            SLOT_PREFIX_LEN,
            buf.remaining()
        )));
    }

    let id = buf.get_u32_le() as usize;
    let present = match buf.get_u32_le() {
        ABSENT => false,
        PRESENT => true,
        other => {
            return Err(SlotError::Corrupt(format!(
                "slot {}: invalid presence flag {}",
                id, other
            )))
        }
    };

    if !present {
        return Ok(Record::empty(id));
    }

    let body_len = 2 * max_field_bytes;
    if buf.remaining() < body_len {
        return Err(SlotError::Truncated(format!(
            "slot {} fields: expected {} bytes, got {}",
            id,
            body_len,
            buf.remaining()
        )));
    }

    let name = take_field(&mut buf, max_field_bytes, id, "name")?;
    let email = take_field(&mut buf, max_field_bytes, id, "email")?;

    Ok(Record {
        id,
        present,
        name,
        email,
    })
}

fn take_field(buf: &mut &[u8], max_field_bytes: usize, id: usize, field: &str) -> Result<String> {
    let slice: &[u8] = *buf;
    let (raw, rest) = slice.split_at(max_field_bytes);
    *buf = rest;

    let end = raw.iter().position(|&b| b == 0).ok_or_else(|| {
        SlotError::Corrupt(format!("slot {} {}: missing terminator", id, field))
    })?;

    String::from_utf8(raw[..end].to_vec()).map_err(|e| {
        SlotError::Corrupt(format!("slot {} {}: invalid UTF-8: {}", id, field, e))
    })
}
