use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;
use crate::format_registry::{FormatRegistry, FormatSchema, Registration};
use crate::writer::{IndexWriter, LogWriter};

/// One binary logging session: two append-only output streams plus the
/// in-memory format registry that keeps them consistent.
///
/// Every call appends one record to the log stream. The first call with a
/// given format string additionally appends one schema record to the index
/// stream and pins the string to a 1-byte slot id for the rest of the
/// session.
///
/// # Thread Safety
///
/// **Important**: an `Encoder` is NOT thread-safe and is designed to be used
/// by a single thread. Every operation takes `&mut self`; for multi-threaded
/// applications, create one `Encoder` per thread or serialize calls through
/// an external queue or mutex. There is no internal locking in the logging
/// path.
///
/// # Resource Handling
///
/// The session owns both file handles and the registry for its whole
/// lifetime. Dropping the encoder flushes both streams best-effort; flush
/// errors during teardown are swallowed, so call [`Encoder::flush`] first if
/// you need to observe them.
///
/// # Examples
///
/// ```
/// use binary_log::{Encoder, binary_log};
///
/// # fn main() -> binary_log::Result<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let mut encoder = Encoder::create(dir.path().join("app.blog"))?;
///
/// binary_log!(encoder, "starting up")?;
/// binary_log!(encoder, "temperature: {} C", 25.5)?;
/// binary_log!(encoder, "status: {}, count: {}", true, 42)?;
///
/// encoder.flush()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Encoder<W: Write = BufWriter<File>> {
    log: LogWriter<W>,
    index: IndexWriter<W>,
    registry: FormatRegistry,
}

impl Encoder<BufWriter<File>> {
    /// Opens a new session writing the log file at `path` and the index file
    /// at `path` + `".index"`.
    ///
    /// Both files are created (or truncated) up front; failure to open
    /// either fails construction and the session never starts.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let log_file = File::create(path)?;

        let mut index_path = path.as_os_str().to_os_string();
        index_path.push(".index");
        let index_file = File::create(&index_path)?;

        trace!(path = %path.display(), "binary log session opened");
        Ok(Self::from_writers(
            BufWriter::new(log_file),
            BufWriter::new(index_file),
        ))
    }
}

impl<W: Write> Encoder<W> {
    /// Builds a session over arbitrary byte sinks.
    ///
    /// Useful for encoding into memory or any other `Write` target; the
    /// wire format is identical to the file-backed session.
    pub fn from_writers(log: W, index: W) -> Self {
        Self {
            log: LogWriter::new(log),
            index: IndexWriter::new(index),
            registry: FormatRegistry::new(),
        }
    }

    /// Appends one log record, registering the format string on first use.
    ///
    /// This is the low-level path under the [`binary_log!`] macro: the
    /// caller supplies the literal, its fingerprint (which must be computed
    /// identically for the same literal every time), the argument count,
    /// and the already-packed argument bytes.
    ///
    /// # Errors
    ///
    /// * [`Error::CapacityExceeded`] on the 257th distinct format string;
    ///   nothing is written to either stream.
    /// * [`Error::SchemaConflict`] if the fingerprint is already registered
    ///   for a different literal (or a different argument count).
    /// * [`Error::FormatTooLong`] for a literal over 255 bytes.
    /// * [`Error::Io`] if an underlying write fails; the session remains
    ///   closable, though the stream may end in a partial record.
    ///
    /// [`Error::CapacityExceeded`]: crate::Error::CapacityExceeded
    /// [`Error::SchemaConflict`]: crate::Error::SchemaConflict
    /// [`Error::FormatTooLong`]: crate::Error::FormatTooLong
    /// [`Error::Io`]: crate::Error::Io
    pub fn append(
        &mut self,
        literal: &'static str,
        fingerprint: u16,
        arg_count: u8,
        packed_args: &[u8],
    ) -> Result<()> {
        let slot = match self
            .registry
            .register_or_lookup(fingerprint, literal, arg_count)?
        {
            Registration::New(slot) => {
                let schema = FormatSchema {
                    fingerprint,
                    literal,
                    arg_count,
                };
                self.index.append(slot, &schema)?;
                debug!(slot, fingerprint, literal, "registered format string");
                slot
            }
            Registration::Existing(slot) => slot,
        };

        self.log.append(slot, packed_args)?;
        Ok(())
    }

    /// Flushes both buffered streams, surfacing any write error.
    pub fn flush(&mut self) -> Result<()> {
        self.log.flush()?;
        self.index.flush()?;
        Ok(())
    }

    /// Number of distinct format strings registered so far in this session.
    pub fn formats_registered(&self) -> usize {
        self.registry.len()
    }

    /// Borrows the underlying log and index sinks, in that order.
    ///
    /// Only the bytes already flushed out of any internal buffering are
    /// visible through a buffered sink; with plain `Vec<u8>` sinks this is
    /// the full encoded output so far.
    pub fn sinks(&self) -> (&W, &W) {
        (self.log.get_ref(), self.index.get_ref())
    }
}

impl<W: Write> Drop for Encoder<W> {
    fn drop(&mut self) {
        // Teardown is best-effort; close errors are not propagated.
        let _ = self.log.flush();
        let _ = self.index.flush();
    }
}

/// Logs a record with the given format string and arguments.
///
/// This macro is the primary interface for logging. It:
/// 1. Computes the format string's fingerprint at compile time, so every
///    call site of the same literal uses the same value
/// 2. Counts the arguments and packs each one to its binary form
/// 3. Appends the record through [`Encoder::append`]
///
/// Arguments must implement [`Packable`](crate::Packable). Calls whose
/// arguments pack into 1024 bytes use a stack buffer; larger calls fall
/// back to a heap allocation sized ahead of time.
///
/// # Examples
///
/// ```
/// use binary_log::{Encoder, binary_log};
///
/// # fn main() -> binary_log::Result<()> {
/// # let dir = tempfile::tempdir().unwrap();
/// # let mut encoder = Encoder::create(dir.path().join("app.blog"))?;
/// binary_log!(encoder, "plain message")?;
/// binary_log!(encoder, "x={}", 5)?;
/// binary_log!(encoder, "user {} logged in from {}", 42u64, "10.0.0.1")?;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! binary_log {
    ($encoder:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        const FINGERPRINT: u16 = $crate::fingerprint::fingerprint($fmt.as_bytes());

        let arg_count = 0u8 $(+ { let _ = &$arg; 1 })*;

        let needed = 0usize $(+ $crate::packer::Packable::packed_len(&$arg))*;

        // Typical calls pack into the stack buffer; oversized calls spill
        // to a heap buffer sized up front instead of panicking.
        let mut temp = [0u8; 1024];
        let mut spill;
        let buf: &mut [u8] = if needed <= temp.len() {
            &mut temp
        } else {
            spill = ::std::vec![0u8; needed];
            &mut spill
        };

        #[allow(unused_mut)]
        let mut pos: usize = 0;
        $(
            pos += $crate::packer::Packable::pack(&$arg, &mut buf[pos..]);
        )*

        $encoder.append($fmt, FINGERPRINT, arg_count, &buf[..pos])
    }};
}
