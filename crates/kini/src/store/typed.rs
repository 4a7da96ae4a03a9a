//! Typed accessors over raw entry values.
//!
//! Every accessor takes an explicit `default` and returns an `Option`.  The
//! default is returned when the key is absent, and, for the numeric
//! accessors, when the value does not parse.  Two accessors deliberately
//! treat a present-but-unusable value differently from an absent one:
//!
//! | Accessor        | absent     | present, unrecognised |
//! |-----------------|------------|-----------------------|
//! | `get_boolean`   | `default`  | `Some(false)`         |
//! | `get_uuid`      | `default`  | `None`                |
//! | `get_int_list`  | `default`  | `Err(..)`             |

use std::str::FromStr;

use uuid::Uuid;

use super::{section_key, IniConfig};
use crate::error::IniError;

/// Values `get_boolean` reads as `true`; matched case-sensitively.
const TRUE_VALUES: [&str; 4] = ["true", "t", "1", "on"];

/// Length of the canonical `8-4-4-4-12` UUID text, the only form accepted.
const HYPHENATED_UUID_LEN: usize = 36;

/// Separator for list values.
const LIST_SEPARATOR: char = ',';

impl IniConfig {
    /// Trims the raw value and parses it, falling back to `default` when the
    /// key is absent or the text does not parse.
    fn get_parsed<T: FromStr>(&self, section: Option<&str>, key: &str, default: Option<T>) -> Option<T> {
        self.get_raw(section, key)
            .and_then(|raw| raw.trim().parse().ok())
            .or(default)
    }

    /// Like `get_parsed`, but for floating-point text in the JVM grammar.
    fn get_floating<T: FromStr>(&self, section: Option<&str>, key: &str, default: Option<T>) -> Option<T> {
        self.get_raw(section, key)
            .and_then(|raw| jvm_float_text(raw.trim()))
            .and_then(|text| text.parse().ok())
            .or(default)
    }

    /// Returns the raw, untrimmed value or `default`.
    pub fn get_string<'a>(
        &'a self,
        section: Option<&str>,
        key: &str,
        default: Option<&'a str>,
    ) -> Option<&'a str> {
        self.get_raw(section, key).or(default)
    }

    /// Returns the value as `f64`.
    ///
    /// Accepts decimal and exponent notation with an optional `f`/`F`/`d`/`D`
    /// suffix (`1.5f`), plus the exact words `NaN` and `Infinity` with an
    /// optional sign.  Rust-only spellings such as `inf` or `nan` fall back to
    /// `default`.  Hexadecimal float literals are not supported.
    pub fn get_double(&self, section: Option<&str>, key: &str, default: Option<f64>) -> Option<f64> {
        self.get_floating(section, key, default)
    }

    /// Returns the value as `f32`.  Same grammar as [`get_double`](Self::get_double).
    pub fn get_float(&self, section: Option<&str>, key: &str, default: Option<f32>) -> Option<f32> {
        self.get_floating(section, key, default)
    }

    /// Returns the value as `i64`.
    pub fn get_long(&self, section: Option<&str>, key: &str, default: Option<i64>) -> Option<i64> {
        self.get_parsed(section, key, default)
    }

    /// Returns the value as `i32`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kini::IniConfig;
    ///
    /// let mut config = IniConfig::from_text("workers = 8\nretries = lots\n");
    /// config.load().unwrap();
    ///
    /// assert_eq!(config.get_int(None, "workers", None), Some(8));
    /// assert_eq!(config.get_int(None, "retries", Some(3)), Some(3));
    /// assert_eq!(config.get_int(None, "missing", None), None);
    /// ```
    pub fn get_int(&self, section: Option<&str>, key: &str, default: Option<i32>) -> Option<i32> {
        self.get_parsed(section, key, default)
    }

    /// Returns the value as `i16`.
    pub fn get_short(&self, section: Option<&str>, key: &str, default: Option<i16>) -> Option<i16> {
        self.get_parsed(section, key, default)
    }

    /// Returns the value as `i8`.  Out-of-range values fall back to `default`.
    pub fn get_byte(&self, section: Option<&str>, key: &str, default: Option<i8>) -> Option<i8> {
        self.get_parsed(section, key, default)
    }

    /// Returns `true` for `true`, `t`, `1` or `on` (after trimming).
    ///
    /// Any other present value is `false`, not `default`; only an absent key
    /// yields `default`.
    pub fn get_boolean(&self, section: Option<&str>, key: &str, default: Option<bool>) -> Option<bool> {
        match self.get_raw(section, key) {
            Some(raw) => Some(TRUE_VALUES.contains(&raw.trim())),
            None => default,
        }
    }

    /// Returns the value parsed as a UUID.
    ///
    /// Only the hyphenated `8-4-4-4-12` form is a UUID here; the simple,
    /// braced and `urn:uuid:` forms count as malformed.  An absent key yields
    /// `default`; a malformed value yields `None` regardless of `default`.
    pub fn get_uuid(&self, section: Option<&str>, key: &str, default: Option<Uuid>) -> Option<Uuid> {
        match self.get_raw(section, key) {
            Some(raw) => parse_hyphenated_uuid(raw.trim()),
            None => default,
        }
    }

    /// Splits the raw value on `,`.  Items are not trimmed.
    pub fn get_list(
        &self,
        section: Option<&str>,
        key: &str,
        default: Option<Vec<String>>,
    ) -> Option<Vec<String>> {
        match self.get_raw(section, key) {
            Some(raw) => Some(raw.split(LIST_SEPARATOR).map(str::to_string).collect()),
            None => default,
        }
    }

    /// Splits the raw value on `,` and parses each trimmed item as `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::InvalidListItem`] for the first item that does not
    /// parse.  An absent key is not an error and yields `Ok(default)`.
    pub fn get_int_list(
        &self,
        section: Option<&str>,
        key: &str,
        default: Option<Vec<i32>>,
    ) -> Result<Option<Vec<i32>>, IniError> {
        let Some(raw) = self.get_raw(section, key) else {
            return Ok(default);
        };

        raw.split(LIST_SEPARATOR)
            .map(str::trim)
            .map(|item| {
                item.parse::<i32>().map_err(|source| IniError::InvalidListItem {
                    section: section_key(section).to_string(),
                    key: key.to_string(),
                    item: item.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Narrows floating-point text to the JVM grammar, returning the part
/// `str::parse` should see, or `None` when the JVM would reject it.
fn jvm_float_text(text: &str) -> Option<&str> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "NaN" || unsigned == "Infinity" {
        return Some(text);
    }

    let numeral = text.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(text);
    numeral
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        .then_some(numeral)
}

/// Parses the hyphenated UUID form only.
fn parse_hyphenated_uuid(text: &str) -> Option<Uuid> {
    if text.len() != HYPHENATED_UUID_LEN {
        return None;
    }
    Uuid::parse_str(text).ok()
}
