//! The textual identifier grammar and its codec.
//!
//! Canonical form (ASCII):
//!
//! ```text
//! swh:1:cnt:e69de29bb2d1d6434b8b29ae775ad8c2e48c5391
//! └┬┘ ┬ └┬┘ └──────────────────┬───────────────────┘
//!  │  │  │                     └ 40 lowercase hex characters
//!  │  │  └ object type tag
//!  │  └ schema version
//!  └ namespace
//! ```
//!
//! An optional qualifier suffix (`;key=value` pairs) is handled by the
//! qualifier module.

use crate::error::{Error, Result};
use crate::hash::Digest;
use crate::object::ObjectType;
use crate::qualifier::{self, Qualifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Namespace token of every identifier.
pub const NAMESPACE: &str = "swh";

/// Schema version emitted and accepted by the default codec.
pub const SCHEMA_VERSION: u32 = 1;

/// A content-derived artifact identifier.
///
/// Identifiers are values: never mutated after construction, compared and
/// stored by their canonical string form. Namespace and schema version are
/// configuration of the [`Codec`], not per-identifier state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    /// Kind of artifact this identifier addresses.
    pub object_type: ObjectType,
    /// 160-bit content digest.
    pub digest: Digest,
    /// Optional annotations, not part of the digest.
    pub qualifiers: Qualifiers,
}

impl Identifier {
    /// Create an unqualified identifier.
    pub fn new(object_type: ObjectType, digest: Digest) -> Self {
        Self {
            object_type,
            digest,
            qualifiers: Qualifiers::new(),
        }
    }

    /// Attach a qualifier map, replacing any existing one.
    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = qualifiers;
        self
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Codec::new().format(self))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&Codec::new().format(self))
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Codec::new().parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Stateless identifier codec.
///
/// Carries the namespace and schema version as explicit configuration;
/// construct one and pass it by reference wherever identifiers cross the
/// text boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    namespace: &'static str,
    schema_version: u32,
}

impl Codec {
    /// Codec for the current scheme (`swh`, version 1).
    pub const fn new() -> Self {
        Self {
            namespace: NAMESPACE,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// The namespace token this codec emits and accepts.
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// The schema version this codec emits and accepts.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// Render the canonical string form, qualifiers included.
    pub fn format(&self, identifier: &Identifier) -> String {
        let mut out = format!(
            "{}:{}:{}:{}",
            self.namespace,
            self.schema_version,
            identifier.object_type.tag(),
            identifier.digest.to_hex()
        );
        qualifier::append_suffix(&mut out, &identifier.qualifiers);
        out
    }

    /// Parse an identifier string, with or without a qualifier suffix.
    ///
    /// The digest is never case-normalized: uppercase hex is malformed.
    pub fn parse(&self, input: &str) -> Result<Identifier> {
        let (core, suffix) = match input.split_once(';') {
            Some((core, suffix)) => (core, Some(suffix)),
            None => (input, None),
        };

        let mut identifier = self.parse_core(core)?;
        if let Some(suffix) = suffix {
            identifier.qualifiers = qualifier::decode_suffix(suffix)?;
        }
        Ok(identifier)
    }

    /// Parse the core grammar: `namespace ":" version ":" type ":" digest`.
    fn parse_core(&self, core: &str) -> Result<Identifier> {
        let parts: Vec<&str> = core.split(':').collect();
        if parts.len() != 4 {
            return Err(Error::malformed(format!(
                "Expected namespace:version:type:digest, got {:?}",
                core
            )));
        }

        if parts[0] != self.namespace {
            return Err(Error::malformed(format!(
                "Unknown namespace: {:?} (expected {:?})",
                parts[0], self.namespace
            )));
        }

        if parts[1].is_empty() || !parts[1].bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed(format!(
                "Version is not a number: {:?}",
                parts[1]
            )));
        }
        // Exact decimal rendering: also rejects leading zeros
        if parts[1] != self.schema_version.to_string() {
            return Err(Error::malformed(format!(
                "Unsupported schema version: {}",
                parts[1]
            )));
        }

        let object_type = ObjectType::from_tag(parts[2])?;

        let digest = match Digest::from_hex(parts[3]) {
            Ok(digest) => digest,
            Err(Error::InvalidDigest { reason }) => return Err(Error::Malformed { reason }),
            Err(other) => return Err(other),
        };

        Ok(Identifier::new(object_type, digest))
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
