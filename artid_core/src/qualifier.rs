//! Qualifier suffix grammar: ordered key/value annotations.
//!
//! Qualifiers annotate an identifier without contributing to its digest:
//!
//! ```text
//! swh:1:dir:94a9ed024d3859793618152ea559a168bbcbb5e2;origin=https%3A%2F%2Fexample.org%2Fm
//! ```
//!
//! Keys are `[A-Za-z0-9_]+`; values are percent-escaped UTF-8. Pair order
//! is caller-significant and survives a round-trip, unlike the sorted
//! ordering used inside tree hashing.

use crate::error::{Error, Result};
use crate::identifier::{Codec, Identifier};
use serde::{Deserialize, Serialize};

/// Insertion-order-preserving map of qualifier keys to decoded values.
///
/// Inserting an existing key replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qualifiers(Vec<(String, String)>);

impl Qualifiers {
    /// Create an empty qualifier map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a qualifier.
    ///
    /// Keys must be non-empty `[A-Za-z0-9_]+`; values must be non-empty.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        validate_key(&key)?;
        if value.is_empty() {
            return Err(Error::malformed_qualifier(format!(
                "Empty value for qualifier {:?}",
                key
            )));
        }

        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(pair) => pair.1 = value,
            None => self.0.push((key, value)),
        }
        Ok(())
    }

    /// Look up a qualifier value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of qualifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no qualifiers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::malformed_qualifier("Qualifier key cannot be empty"));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(Error::malformed_qualifier(format!(
            "Invalid qualifier key: {:?} (allowed: [A-Za-z0-9_])",
            key
        )));
    }
    Ok(())
}

/// Bytes left unescaped in values. Everything else, the reserved
/// characters `;`, `=` and `%` included, is emitted as `%XX`.
fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'~' | b'!' | b'*' | b'\'' | b'(' | b')'
        )
}

fn escape_value_into(out: &mut String, value: &str) {
    for byte in value.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(hex_digit(byte >> 4));
            out.push(hex_digit(byte & 0x0f));
        }
    }
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(nibble as u32, 16)
        .unwrap_or('0')
        .to_ascii_uppercase()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|v| v as u8)
}

/// Strictly percent-decode a value. Escapes may use either hex case, but
/// an unescaped reserved character or a truncated escape is an error.
fn unescape_value(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let (hi, lo) = match (bytes.get(i + 1), bytes.get(i + 2)) {
                    (Some(&hi), Some(&lo)) => (hex_value(hi), hex_value(lo)),
                    _ => (None, None),
                };
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => {
                        return Err(Error::malformed_qualifier(format!(
                            "Truncated or invalid escape in {:?}",
                            raw
                        )));
                    }
                }
                i += 3;
            }
            b'=' => {
                return Err(Error::malformed_qualifier(format!(
                    "Unescaped '=' in qualifier value {:?}",
                    raw
                )));
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| Error::malformed_qualifier(format!("Value is not valid UTF-8: {:?}", raw)))
}

/// Append `;key=escaped-value` for each pair, in insertion order.
pub(crate) fn append_suffix(out: &mut String, qualifiers: &Qualifiers) {
    for (key, value) in qualifiers.iter() {
        out.push(';');
        out.push_str(key);
        out.push('=');
        escape_value_into(out, value);
    }
}

/// Decode the suffix after the first `;` of a qualified identifier.
pub(crate) fn decode_suffix(suffix: &str) -> Result<Qualifiers> {
    let mut qualifiers = Qualifiers::new();
    for segment in suffix.split(';') {
        if segment.is_empty() {
            return Err(Error::malformed_qualifier("Empty qualifier segment"));
        }
        let (key, raw_value) = segment.split_once('=').ok_or_else(|| {
            Error::malformed_qualifier(format!("Qualifier segment without '=': {:?}", segment))
        })?;
        validate_key(key)?;
        let value = unescape_value(raw_value)?;
        qualifiers.insert(key, value)?;
    }
    Ok(qualifiers)
}

impl Codec {
    /// Render the identifier's core form with the given qualifiers
    /// appended in insertion order. Qualifiers already attached to
    /// `identifier` are not emitted; the caller-supplied map is
    /// authoritative.
    pub fn attach(&self, identifier: &Identifier, qualifiers: &Qualifiers) -> String {
        let core = Identifier::new(identifier.object_type, identifier.digest);
        let mut out = self.format(&core);
        append_suffix(&mut out, qualifiers);
        out
    }

    /// Split a qualified identifier string into its core string and the
    /// decoded qualifier map. The core part must itself be well-formed.
    pub fn detach(&self, input: &str) -> Result<(String, Qualifiers)> {
        match input.split_once(';') {
            Some((core, suffix)) => {
                self.parse(core)?;
                Ok((core.to_string(), decode_suffix(suffix)?))
            }
            None => {
                self.parse(input)?;
                Ok((input.to_string(), Qualifiers::new()))
            }
        }
    }
}
