//! INI parsing: per-line classification and the single-pass section builder.
//!
//! Parsing never fails on content.  Every line lands in exactly one
//! [`LineKind`] and the builder treats [`LineKind::Malformed`] as a no-op, so
//! the only way a parse can fail is an error from the line iterator itself.

pub mod line;
pub mod sections;

pub use line::{classify, Entry, LineKind};
pub use sections::{parse_lines, parse_str, ParsedSections, DEFAULT_SECTION};
