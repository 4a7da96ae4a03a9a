//! Line sources: where the raw INI text comes from.
//!
//! A [`LineSource`] is fixed when the store is constructed.  Each load calls
//! [`LineSource::open`], reads the returned handle to the end and drops it
//! before returning, so the file descriptor (or reader) is released even when
//! a read fails halfway through.
//!
//! # File vs. reader
//!
//! A file path can be reopened any number of times, which is what makes
//! `reload` pick up edits on disk.  A reader is a one-shot stream: the first
//! load takes ownership of it and closes it, and later loads report
//! [`IniError::SourceConsumed`].
//!
//! # Line splitting
//!
//! [`decoded_lines`] ends a line at `\n`, `\r\n` or a lone `\r`, so files
//! with classic Mac line endings split the same way as Unix and Windows ones.
//! Bytes that are not valid UTF-8 become U+FFFD instead of failing the load;
//! only genuine read faults surface as errors.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::IniError;

/// A buffered, sendable line reader handed to the parser for one load.
pub type LineReader = Box<dyn BufRead + Send>;

/// The external collaborator that supplies lines of INI text.
pub enum LineSource {
    /// A file on disk, reopened on every load.
    File(PathBuf),
    /// A stream that has not been read yet.
    Reader(LineReader),
    /// A stream that an earlier load has drained and closed.
    Consumed,
}

impl LineSource {
    /// Creates a source backed by the file at `path`.
    ///
    /// The file is not touched until the first load, so a missing file shows
    /// up as [`IniError::Io`] from `load` rather than here.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates a one-shot source from any reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self::Reader(Box::new(BufReader::new(reader)))
    }

    /// Creates a one-shot source over in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::Reader(Box::new(Cursor::new(text.into())))
    }

    /// Describes the source for log lines and error messages.
    pub fn origin(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Reader(_) => "reader".to_string(),
            Self::Consumed => "consumed reader".to_string(),
        }
    }

    /// Returns the file path for file-backed sources.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// Acquires a reader for one load.
    ///
    /// Reader-backed sources move to [`LineSource::Consumed`]; the caller owns
    /// the returned handle and closes it by dropping it.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be opened and
    /// [`IniError::SourceConsumed`] if a reader was already used.
    pub fn open(&mut self) -> Result<LineReader, IniError> {
        match std::mem::replace(self, Self::Consumed) {
            Self::Reader(reader) => Ok(reader),
            Self::Consumed => Err(IniError::SourceConsumed),
            Self::File(path) => {
                let opened = File::open(&path);
                let origin = path.display().to_string();
                // Files stay reusable; put the path back before reporting.
                *self = Self::File(path);
                let file = opened.map_err(|source| IniError::Io { origin, source })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
            Self::Consumed => f.write_str("Consumed"),
        }
    }
}

/// Splits one chunk read up to and including a `\n` into its lines.
///
/// The chunk's own terminator (`\n`, `\r\n` or a final `\r`) is removed;
/// any `\r` left inside ends a line of its own.
pub(crate) fn split_chunk(chunk: &str) -> impl Iterator<Item = &str> {
    let body = chunk.strip_suffix('\n').unwrap_or(chunk);
    let body = body.strip_suffix('\r').unwrap_or(body);
    body.split('\r')
}

/// Iterator over the decoded lines of a reader.  See [`decoded_lines`].
pub struct DecodedLines<R> {
    reader: R,
    /// Raw bytes of the chunk currently being split.
    buf: Vec<u8>,
    /// Lines already split out of the last chunk but not yet returned.
    pending: VecDeque<String>,
}

/// Reads `reader` line by line, decoding each line lossily as UTF-8.
///
/// # Examples
///
/// ```rust
/// use kini::source::decoded_lines;
///
/// let lines: Vec<String> = decoded_lines(&b"a\r\nb\rc\n\xe9"[..])
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(lines, vec!["a", "b", "c", "\u{FFFD}"]);
/// ```
pub fn decoded_lines<R: BufRead>(reader: R) -> DecodedLines<R> {
    DecodedLines {
        reader,
        buf: Vec::new(),
        pending: VecDeque::new(),
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(Ok(line));
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&self.buf);
                    self.pending.extend(split_chunk(&text).map(str::to_string));
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_source_is_consumed_after_first_open() {
        // Arrange
        let mut source = LineSource::from_text("a=1\n");

        // Act
        let first = source.open();
        let second = source.open();

        // Assert
        assert!(first.is_ok());
        assert!(matches!(second, Err(IniError::SourceConsumed)));
        assert!(matches!(source, LineSource::Consumed));
    }

    #[test]
    fn test_file_source_reopens_on_every_open() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "k = v").expect("write");
        let mut source = LineSource::from_path(file.path());

        // Act
        let mut first = String::new();
        source.open().expect("first open").read_line(&mut first).expect("read");
        let mut second = String::new();
        source.open().expect("second open").read_line(&mut second).expect("read");

        // Assert
        assert_eq!(first, "k = v\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_file_reports_io_error_with_path() {
        // Arrange
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.ini");
        let mut source = LineSource::from_path(&path);

        // Act
        let result = source.open();

        // Assert
        match result {
            Err(IniError::Io { origin, source }) => {
                assert_eq!(origin, path.display().to_string());
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other.map(|_| ())),
        }
    }

    // ── Line splitting ────────────────────────────────────────────────────────

    fn collect_lines(bytes: &[u8]) -> Vec<String> {
        decoded_lines(bytes)
            .collect::<io::Result<Vec<_>>>()
            .expect("in-memory reads cannot fail")
    }

    #[test]
    fn test_decoded_lines_split_on_all_terminators() {
        // Arrange
        let bytes = b"unix\nwindows\r\nmac\rlast";

        // Act
        let lines = collect_lines(bytes);

        // Assert
        assert_eq!(lines, vec!["unix", "windows", "mac", "last"]);
    }

    #[test]
    fn test_decoded_lines_keep_empty_lines() {
        assert_eq!(collect_lines(b"a\n\nb\r\rc\r\n\r\n"), vec!["a", "", "b", "", "c", ""]);
        assert!(collect_lines(b"").is_empty());
        assert_eq!(collect_lines(b"\n"), vec![""]);
    }

    #[test]
    fn test_decoded_lines_replace_invalid_utf8() {
        // Arrange – a Latin-1 'é' is not valid UTF-8
        let bytes = b"; caf\xe9\nk = v\n";

        // Act
        let lines = collect_lines(bytes);

        // Assert
        assert_eq!(lines, vec!["; caf\u{FFFD}", "k = v"]);
    }

    #[test]
    fn test_decoded_lines_surface_read_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "bad sector"))
            }
        }

        let mut lines = decoded_lines(BufReader::new(Broken));

        assert!(matches!(lines.next(), Some(Err(e)) if e.to_string() == "bad sector"));
    }

    #[test]
    fn test_origin_and_path_describe_the_source() {
        let file = LineSource::from_path("/tmp/app.ini");
        let reader = LineSource::from_reader(std::io::empty());

        assert_eq!(file.origin(), "/tmp/app.ini");
        assert_eq!(file.path(), Some(Path::new("/tmp/app.ini")));
        assert_eq!(reader.origin(), "reader");
        assert_eq!(reader.path(), None);
        assert_eq!(format!("{reader:?}"), "Reader(..)");
    }
}
