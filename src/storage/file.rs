//! Storage File
//!
//! Whole-file load and persist for a single table.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::BytesMut;

use crate::error::{Result, SlotError};
use crate::record::{self, encoded_len, Record, SLOT_PREFIX_LEN};
use crate::table::Table;

use super::{Header, OpenMode, HEADER_LEN};

/// An open slotdb file
///
/// There is no incremental write path: `write_all` always rewrites the
/// header and every slot from offset 0.
#[derive(Debug)]
pub struct StorageFile {
    /// Path the file was opened from (for messages)
    path: PathBuf,
    /// Underlying file handle
    file: File,
    /// fsync after each rewrite
    sync_on_write: bool,
}

impl StorageFile {
    /// Open a storage file
    ///
    /// `Create` creates or truncates; `ReadWrite` requires the file to exist.
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self> {
        let mut options = OpenOptions::new();
        options.read(true).write(true);
        if mode == OpenMode::Create {
            options.create(true).truncate(true);
        }

        let file = options.open(path).map_err(|e| {
            SlotError::Io(io::Error::new(
                e.kind(),
                format!("failed to open {}: {}", path.display(), e),
            ))
        })?;

        tracing::debug!(path = %path.display(), ?mode, "storage file opened");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            sync_on_write: true,
        })
    }

    /// Enable or disable fsync after each rewrite
    pub fn with_sync_on_write(mut self, sync: bool) -> Self {
        self.sync_on_write = sync;
        self
    }

    /// Read and validate the header at offset 0
    pub fn read_header(&mut self) -> Result<Header> {
        self.file.seek(SeekFrom::Start(0))?;

        let mut bytes = [0u8; HEADER_LEN];
        read_exact_or(&mut self.file, &mut bytes, || {
            format!("header: expected {} bytes", HEADER_LEN)
        })?;

        Header::decode(&bytes)
    }

    /// Read the `header.capacity` slots that follow the header
    pub fn read_all(&mut self, header: &Header) -> Result<Vec<Record>> {
        let file_len = self.file.metadata()?.len();
        if file_len < header.min_file_len() {
            return Err(SlotError::Truncated(format!(
                "{} is {} bytes, header declares at least {}",
                self.path.display(),
                file_len,
                header.min_file_len()
            )));
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(header.capacity)?;

        self.file.seek(SeekFrom::Start(HEADER_LEN as u64))?;
        let mut reader = BufReader::new(&mut self.file);
        let mut consumed = HEADER_LEN as u64;
        let mut prefix = [0u8; SLOT_PREFIX_LEN];
        // Grown only when a present slot is met and the file can hold its fields
        let mut slot: Vec<u8> = Vec::new();

        for pos in 0..header.capacity {
            read_exact_or(&mut reader, &mut prefix, || {
                format!("slot {}: expected {} byte prefix", pos, SLOT_PREFIX_LEN)
            })?;
            consumed += SLOT_PREFIX_LEN as u64;

            // Present = 1 is the only flag that carries text bytes
            let present = prefix[4..] == 1u32.to_le_bytes();
            let body_len = 2 * header.max_field_bytes as u64;
            if present && body_len > file_len.saturating_sub(consumed) {
                return Err(SlotError::Truncated(format!(
                    "slot {}: expected {} bytes of fields, {} left in file",
                    pos,
                    body_len,
                    file_len.saturating_sub(consumed)
                )));
            }

            let slot_len = encoded_len(present, header.max_field_bytes);
            slot.clear();
            slot.try_reserve_exact(slot_len)?;
            slot.extend_from_slice(&prefix);
            slot.resize(slot_len, 0);
            read_exact_or(&mut reader, &mut slot[SLOT_PREFIX_LEN..], || {
                format!(
                    "slot {}: expected {} bytes of fields",
                    pos,
                    slot_len - SLOT_PREFIX_LEN
                )
            })?;

            slots.push(record::decode(&slot, header.max_field_bytes)?);
            consumed += (slot_len - SLOT_PREFIX_LEN) as u64;
        }

        if consumed < file_len {
            tracing::warn!(
                path = %self.path.display(),
                trailing = file_len - consumed,
                "ignoring bytes after the last slot"
            );
        }

        Ok(slots)
    }

    /// Read the header and every slot into a table
    pub fn load(&mut self) -> Result<Table> {
        let header = self.read_header()?;
        let slots = self.read_all(&header)?;
        let table = Table::from_slots(header.max_field_bytes, slots)?;

        tracing::debug!(
            path = %self.path.display(),
            capacity = header.capacity,
            max_field_bytes = header.max_field_bytes,
            occupied = table.len(),
            "table loaded"
        );
        Ok(table)
    }

    /// Rewrite the whole file from `table`
    ///
    /// Returns the number of bytes written. The file is truncated to exactly
    /// that length, so a table that shrank leaves no stale slots behind.
    pub fn write_all(&mut self, table: &Table) -> Result<u64> {
        let max_field_bytes = table.max_field_bytes();
        let header = Header {
            max_field_bytes,
            capacity: table.capacity(),
        };

        self.file.seek(SeekFrom::Start(0))?;
        let mut writer = BufWriter::new(&mut self.file);

        let mut buf = BytesMut::with_capacity(HEADER_LEN);
        header.encode_into(&mut buf);
        writer.write_all(&buf)?;
        let mut written = buf.len() as u64;

        for slot in table.slots() {
            written += record::write_to(slot, max_field_bytes, &mut writer)?;
        }

        writer.flush()?;
        drop(writer);

        self.file.set_len(written)?;
        if self.sync_on_write {
            self.file.sync_all()?;
        }

        tracing::debug!(path = %self.path.display(), bytes = written, "table persisted");
        Ok(written)
    }

    /// Release the handle
    ///
    /// Writes are already synced by `write_all`, so a read-only session
    /// closes without touching the disk.
    pub fn close(self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), "storage file closed");
        Ok(())
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// `read_exact` that reports a short read as `Truncated`
fn read_exact_or<R, F>(reader: &mut R, buf: &mut [u8], what: F) -> Result<()>
where
    R: Read,
    F: FnOnce() -> String,
{
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SlotError::Truncated(what()),
        _ => SlotError::Io(e),
    })
}
