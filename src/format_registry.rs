//! Format string deduplication for the binary log encoder.
//!
//! Each distinct format string in a session is assigned a 1-byte slot id,
//! in strict first-occurrence order: 0, 1, 2, … A slot is never reassigned
//! and never recomputed, so slot references already written to the files
//! stay valid for the whole session. Slots are positions in an append-only
//! `Vec`; the fingerprint map is only a lookup accelerator.
//!
//! The registry lives inside one [`Encoder`](crate::Encoder) session and
//! dies with it. It is not shared between sessions or threads.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Maximum number of distinct format strings per session (1-byte slot id).
pub const MAX_SLOTS: usize = 256;

/// A registered format string: the literal, its fingerprint, and how many
/// arguments each log record for it carries. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSchema {
    /// 16-bit digest of the literal, the dedup lookup key.
    pub fingerprint: u16,
    /// The format string itself.
    pub literal: &'static str,
    /// Number of packed arguments per log record.
    pub arg_count: u8,
}

/// Outcome of a registry lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The fingerprint was already registered under this slot.
    Existing(u8),
    /// A new slot was assigned; the caller must append one index record.
    New(u8),
}

impl Registration {
    /// The slot id, whether new or existing.
    pub fn slot(self) -> u8 {
        match self {
            Registration::Existing(slot) | Registration::New(slot) => slot,
        }
    }
}

/// Session-scoped mapping from format string fingerprints to slot ids.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    /// Schemas in slot order; a slot id is an index into this vector.
    schemas: Vec<FormatSchema>,
    /// fingerprint → slot lookup.
    slots: HashMap<u16, u8>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct format strings registered so far.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Looks up the schema assigned to a slot.
    pub fn schema(&self, slot: u8) -> Option<&FormatSchema> {
        self.schemas.get(slot as usize)
    }

    /// Returns the slot for `fingerprint`, registering a new schema on first
    /// occurrence.
    ///
    /// The fingerprint is only a pre-filter: on a hit, the stored literal and
    /// argument count are compared, and a mismatch is a
    /// [`Error::SchemaConflict`] rather than a silent alias. A new
    /// registration fails with [`Error::CapacityExceeded`] once `MAX_SLOTS`
    /// schemas exist and with [`Error::FormatTooLong`] for a literal that
    /// does not fit the 1-byte length field of an index record. On any
    /// error, the registry is unchanged.
    pub fn register_or_lookup(
        &mut self,
        fingerprint: u16,
        literal: &'static str,
        arg_count: u8,
    ) -> Result<Registration> {
        if let Some(&slot) = self.slots.get(&fingerprint) {
            let schema = &self.schemas[slot as usize];
            if schema.literal != literal || schema.arg_count != arg_count {
                return Err(Error::SchemaConflict {
                    fingerprint,
                    existing: schema.literal.to_string(),
                    incoming: literal.to_string(),
                });
            }
            return Ok(Registration::Existing(slot));
        }

        if literal.len() > u8::MAX as usize {
            return Err(Error::FormatTooLong { len: literal.len() });
        }
        if self.schemas.len() >= MAX_SLOTS {
            return Err(Error::CapacityExceeded { limit: MAX_SLOTS });
        }

        let slot = self.schemas.len() as u8;
        self.schemas.push(FormatSchema {
            fingerprint,
            literal,
            arg_count,
        });
        self.slots.insert(fingerprint, slot);
        Ok(Registration::New(slot))
    }
}
