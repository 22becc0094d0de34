//! Leaf content addressing.

use crate::error::{Error, Result};
use crate::hash::Digest;
use crate::identifier::Identifier;
use crate::object::ObjectType;

/// Address a byte sequence as a content identifier.
///
/// The digest covers the framing `"blob " <decimal-length> NUL` followed
/// by the raw bytes. Equal byte sequences always produce equal
/// identifiers; no qualifiers are attached.
pub fn address_content(bytes: &[u8]) -> Identifier {
    Identifier::new(ObjectType::Content, Digest::hash_object("blob", bytes))
}

/// Address a byte sequence, rejecting content above `max_size` bytes.
pub fn address_content_limited(bytes: &[u8], max_size: u64) -> Result<Identifier> {
    let actual = bytes.len() as u64;
    if actual > max_size {
        return Err(Error::resource_limit(max_size, actual));
    }
    Ok(address_content(bytes))
}
