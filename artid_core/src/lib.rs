//! # Artid Core
//!
//! Content-derived provenance identifiers for software and AI model
//! artifacts.
//!
//! This library computes durable identifiers from artifact bytes so that
//! provenance records can reference an exact byte-for-byte version of a
//! file, a directory tree or a training snapshot without relying on
//! mutable names or external registries. Leaf content is digested under a
//! git-style framing; directories fold their children's digests in a
//! canonical order (a Merkle tree); the textual form follows the SWHID
//! grammar with optional percent-escaped qualifiers.
//!
//! ## Features
//!
//! - Content addressing: equal bytes always yield equal identifiers
//! - Canonical, order-independent tree addressing for directories
//! - Strict identifier grammar with a round-tripping parser
//! - Insertion-order-preserving qualifier suffixes
//! - Lineage edges for provenance graphs
//!
//! ## Example
//!
//! ```
//! use artid_core::{address_content, Codec, Qualifiers};
//!
//! # fn main() -> Result<(), artid_core::Error> {
//! let id = address_content(b"model weights");
//! let codec = Codec::new();
//!
//! let text = codec.format(&id);
//! assert_eq!(codec.parse(&text)?, id);
//!
//! let mut qualifiers = Qualifiers::new();
//! qualifiers.insert("origin", "https://example.org/m")?;
//! let qualified = codec.attach(&id, &qualifiers);
//! let (core, detached) = codec.detach(&qualified)?;
//! assert_eq!(core, text);
//! assert_eq!(detached, qualifiers);
//! # Ok(())
//! # }
//! ```

mod content;
mod error;
mod hash;
mod identifier;
mod lineage;
mod object;
mod qualifier;
mod snapshot;
mod tree;
mod walk;

pub use content::{address_content, address_content_limited};
pub use error::{Error, Result};
pub use hash::{Digest, DIGEST_SIZE};
pub use identifier::{Codec, Identifier, NAMESPACE, SCHEMA_VERSION};
pub use lineage::{model_lineage, record_edge, relations, LineageEdge};
pub use object::ObjectType;
pub use qualifier::Qualifiers;
pub use snapshot::{address_snapshot, TrainingSnapshot};
pub use tree::{address_tree, DirectoryEntry, EntryKind};
pub use walk::{
    address_directory, address_file, address_path, describe_file, FileArtifact, WalkOptions,
};
