//! # Binary Log
//!
//! A compact binary log encoder: logging calls are serialized into two
//! append-only files instead of formatted text, for near-zero per-call
//! overhead:
//!
//! * **Index file** (`path.index`): one schema record per distinct format
//!   string, holding its slot id, the literal, and its argument count
//! * **Log file** (`path`): one record per call, a 1-byte slot reference
//!   followed by the packed argument bytes
//!
//! No string formatting happens at call time, only byte-exact serialization.
//! A reader reconstructs human-readable lines offline by replaying the index
//! into a slot table and scanning the log with it; this crate is the
//! write side only.
//!
//! ## Key Features
//!
//! * Format string deduplication: each literal costs its full bytes once,
//!   then 1 byte per call
//! * Compile-time fingerprinting: the `binary_log!` macro folds a CRC-16 of
//!   the literal into the call site
//! * Fixed little-endian packing for primitives, length-prefixed packing for
//!   strings, no per-value type tags
//! * Fingerprint collisions and slot exhaustion are detected and reported,
//!   never silently aliased or wrapped
//!
//! ## Quick Start
//!
//! ```
//! use binary_log::{Encoder, binary_log};
//!
//! # fn main() -> binary_log::Result<()> {
//! let dir = tempfile::tempdir().unwrap();
//! let mut encoder = Encoder::create(dir.path().join("app.blog"))?;
//!
//! binary_log!(encoder, "service started")?;
//! binary_log!(encoder, "request {} took {} ms", 17u64, 3.5)?;
//! binary_log!(encoder, "request {} took {} ms", 18u64, 2.25)?;
//!
//! encoder.flush()?;
//! // app.blog now holds 3 compact records; app.blog.index holds 2 schemas.
//! # Ok(())
//! # }
//! ```

pub mod encoder;
pub mod error;
pub mod fingerprint;
pub mod format_registry;
pub mod packer;
pub mod writer;

pub use encoder::Encoder;
pub use error::{Error, Result};
pub use format_registry::{FormatRegistry, FormatSchema, Registration, MAX_SLOTS};
pub use packer::Packable;
pub use writer::{IndexWriter, LogWriter};
