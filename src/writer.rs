//! Append-only writers for the two on-disk streams.
//!
//! Neither file carries a header, magic number, version, checksum, or record
//! terminator. The index file is a sequence of schema records in slot order;
//! the log file is a sequence of call records whose boundaries are only
//! recoverable with the index (record layout is schema-dependent).

use std::io::{self, Write};

use crate::format_registry::FormatSchema;

/// Appends one schema record per newly assigned slot to the index stream.
///
/// Record layout: `slot(1) · literal_len(1) · literal bytes · arg_count(1)`.
/// Records are written exactly once, in slot-assignment order, and never
/// rewritten.
#[derive(Debug)]
pub struct IndexWriter<W: Write> {
    inner: W,
}

impl<W: Write> IndexWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Appends the index record for a newly assigned slot.
    pub fn append(&mut self, slot: u8, schema: &FormatSchema) -> io::Result<()> {
        let literal = schema.literal.as_bytes();
        // The registry rejects literals over 255 bytes before we get here.
        self.inner.write_all(&[slot, literal.len() as u8])?;
        self.inner.write_all(literal)?;
        self.inner.write_all(&[schema.arg_count])
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}

/// Appends one call record per logging call to the log stream.
///
/// Record layout: `slot(1) · packed argument bytes`. There is no length
/// prefix and no terminator; the argument bytes are whatever the packer
/// produced, concatenated in call order.
#[derive(Debug)]
pub struct LogWriter<W: Write> {
    inner: W,
}

impl<W: Write> LogWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Appends one log record referencing an already-registered slot.
    pub fn append(&mut self, slot: u8, packed_args: &[u8]) -> io::Result<()> {
        self.inner.write_all(&[slot])?;
        self.inner.write_all(packed_args)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }
}
