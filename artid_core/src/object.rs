//! Object types addressed by the identifier scheme.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of artifact an identifier addresses.
///
/// Each type has a fixed three-character tag used in the textual
/// identifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    /// A single opaque byte sequence (file content).
    Content,
    /// A named collection of leaf and/or composite children.
    Directory,
    /// A commit/revision.
    Revision,
    /// A tagged release.
    Release,
    /// A repository or training snapshot.
    Snapshot,
}

impl ObjectType {
    /// Returns the three-character tag used in identifier strings.
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectType::Content => "cnt",
            ObjectType::Directory => "dir",
            ObjectType::Revision => "rev",
            ObjectType::Release => "rel",
            ObjectType::Snapshot => "snp",
        }
    }

    /// Parse an object type from its tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "cnt" => Ok(ObjectType::Content),
            "dir" => Ok(ObjectType::Directory),
            "rev" => Ok(ObjectType::Revision),
            "rel" => Ok(ObjectType::Release),
            "snp" => Ok(ObjectType::Snapshot),
            _ => Err(Error::malformed(format!(
                "Unrecognized object type tag: {:?}",
                tag
            ))),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
