//! # kini
//!
//! Parses INI-style configuration text into sections of key/value entries and
//! answers typed lookups against them.
//!
//! The crate has no dependencies on UI frameworks or network sockets.  Text
//! arrives through a [`LineSource`]: either a file path (reopened on every
//! load) or a reader (consumed by the first load).
//!
//! # Architecture overview (for beginners)
//!
//! - **`source`** – Where lines come from.  Opening the source is scoped to a
//!   single load; the file handle or reader is dropped before `load` returns,
//!   even when a read fails halfway through.  Lines end at `\n`, `\r\n` or a
//!   lone `\r`, and invalid UTF-8 is replaced instead of failing the load.
//!
//! - **`parser`** – Classifies each line (section header, comment/blank,
//!   entry, malformed) and folds the lines into sections in one forward pass.
//!   Malformed lines are skipped, never reported as errors.
//!
//! - **`store`** – [`IniConfig`], the queryable store.  `load` rebuilds the
//!   whole map from the source; the `get_*` family reads from it with a
//!   caller-supplied default.
//!
//! # Example
//!
//! ```rust
//! use kini::IniConfig;
//!
//! let mut config = IniConfig::from_text("name = demo\n[server]\nport = 8080 ; http\n");
//! assert_eq!(config.load().unwrap(), true);
//!
//! assert_eq!(config.get_string(None, "name", None), Some("demo"));
//! assert_eq!(config.get_int(Some("server"), "port", None), Some(8080));
//! assert_eq!(config.get_int(Some("server"), "workers", Some(4)), Some(4));
//! ```

// Declare the top-level modules.  `parser` and `store` are directories
// (src/parser/mod.rs, src/store/mod.rs); the other two are single files.
pub mod error;
pub mod parser;
pub mod source;
pub mod store;

// Re-export the types most callers need so they can write `kini::IniConfig`
// instead of `kini::store::IniConfig`.
pub use error::IniError;
pub use parser::{Entry, LineKind};
// `LineSource` is only needed when building a store from a custom source via
// `IniConfig::with_source`; the `from_*` constructors cover the common cases.
pub use source::LineSource;
pub use store::IniConfig;
