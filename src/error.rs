use std::io;

use thiserror::Error;

/// Result type for encoder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding a log session.
#[derive(Error, Debug)]
pub enum Error {
    /// An underlying file open or write failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A 257th distinct format string was logged in one session.
    ///
    /// Slot ids are a single byte, so a session can hold at most 256
    /// distinct format strings. The slot counter is never wrapped; the
    /// offending call writes nothing to either file.
    #[error("format slot capacity exceeded ({limit} distinct format strings per session)")]
    CapacityExceeded {
        /// Maximum number of distinct format strings per session.
        limit: usize,
    },

    /// Two distinct format strings produced the same fingerprint.
    ///
    /// The fingerprint is a 16-bit digest, so collisions are possible.
    /// The registry compares the stored literal (and argument count) and
    /// refuses to alias the second schema onto the first's slot.
    #[error("fingerprint {fingerprint:#06x} already registered for {existing:?}, refusing {incoming:?}")]
    SchemaConflict {
        /// The colliding fingerprint value.
        fingerprint: u16,
        /// The literal already registered under this fingerprint.
        existing: String,
        /// The literal that collided with it.
        incoming: String,
    },

    /// A format string literal longer than 255 bytes was logged.
    ///
    /// The index record stores the literal length in a single byte.
    #[error("format string is {len} bytes, index records hold at most 255")]
    FormatTooLong {
        /// Byte length of the rejected literal.
        len: usize,
    },
}
