//! The config store: owns the line source and the parsed sections.
//!
//! # Load semantics
//!
//! [`IniConfig::load`] reads the whole source and builds a fresh section map.
//! The new map replaces the old one only after the pass completes, so a load
//! that fails with an I/O error leaves the previously loaded values in place.
//! Sections that disappear from the source disappear from the store.
//!
//! Loading needs `&mut self` and every lookup takes `&self`, so no lookup can
//! observe a half-finished reload.

mod typed;

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::error::IniError;
use crate::parser::{parse_lines, Entry, DEFAULT_SECTION};
use crate::source::{decoded_lines, LineSource};

/// Sections of key/value entries parsed from INI text, with typed lookups.
///
/// # Examples
///
/// ```rust
/// use kini::IniConfig;
///
/// let mut config = IniConfig::from_text("[a]\nx = 1\n[b]\ny = 2\n");
/// config.load().unwrap();
///
/// assert_eq!(config.get_string(Some("a"), "x", None), Some("1"));
/// assert_eq!(config.get_string(Some("a"), "y", Some("none")), Some("none"));
/// ```
#[derive(Debug, Default)]
pub struct IniConfig {
    /// Where lines come from; `None` means nothing to load.
    source: Option<LineSource>,
    /// Section name to entries in source order.
    sections: HashMap<String, Vec<Entry>>,
    /// Set once a load has completed.
    loaded: bool,
}

impl IniConfig {
    /// Creates a store with no line source.  [`load`](Self::load) on it
    /// returns `Ok(false)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given line source.
    pub fn with_source(source: LineSource) -> Self {
        Self {
            source: Some(source),
            ..Self::default()
        }
    }

    /// Creates a store that reads the file at `path` on every load.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::with_source(LineSource::from_path(path))
    }

    /// Creates a store over a one-shot reader.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: std::io::Read + Send + 'static,
    {
        Self::with_source(LineSource::from_reader(reader))
    }

    /// Creates a store over in-memory text, loadable once.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_source(LineSource::from_text(text))
    }

    /// Returns the configured line source, if any.
    pub fn source(&self) -> Option<&LineSource> {
        self.source.as_ref()
    }

    /// Parses the line source and replaces the store's contents.
    ///
    /// Returns `Ok(false)` without touching the store when no source was
    /// configured.  Malformed lines are skipped silently, and bytes that are
    /// not valid UTF-8 are replaced rather than failing the load.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the source cannot be opened or read, and
    /// [`IniError::SourceConsumed`] if a reader-backed source was already
    /// loaded.  The previous contents survive either error.
    pub fn load(&mut self) -> Result<bool, IniError> {
        let Some(source) = self.source.as_mut() else {
            debug!("load requested with no line source configured");
            return Ok(false);
        };

        let origin = source.origin();
        debug!(%origin, "loading INI source");

        let parsed = {
            let reader = source.open()?;
            // The reader is dropped at the end of this block, error or not.
            parse_lines(decoded_lines(reader)).map_err(|source| IniError::Io {
                origin: origin.clone(),
                source,
            })?
        };

        debug!(
            %origin,
            sections = parsed.sections.len(),
            entries = parsed.entry_count(),
            lines = parsed.lines_read,
            dropped = parsed.lines_dropped,
            "loaded INI source"
        );

        self.sections = parsed.sections;
        self.loaded = true;
        Ok(true)
    }

    /// Loads the source again.  Same contract as [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn reload(&mut self) -> Result<bool, IniError> {
        self.load()
    }

    /// Returns `true` once a load has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Iterates over the stored section names, including `""` for the default
    /// section.  Order is unspecified.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Returns `true` if `section` (default section for `None`) is stored.
    pub fn has_section(&self, section: Option<&str>) -> bool {
        self.sections.contains_key(section_key(section))
    }

    /// Returns the entries of `section` in source order, or an empty slice.
    pub fn entries(&self, section: Option<&str>) -> &[Entry] {
        self.sections
            .get(section_key(section))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the raw value of the first entry named `key` in `section`.
    ///
    /// Keys compare exactly and case-sensitively.  The value is returned as
    /// stored, without trimming.
    pub fn get_raw(&self, section: Option<&str>, key: &str) -> Option<&str> {
        self.entries(section)
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

/// Maps an optional section name to its storage key.
fn section_key(section: Option<&str>) -> &str {
    section.unwrap_or(DEFAULT_SECTION)
}
