//! Canonical tree encoding and composite addressing.
//!
//! A composite artifact is addressed by folding its children's digests:
//! entries are sorted by name (byte-wise, locale-independent), rendered as
//! `"<mode> <name>\0<raw-20-byte-digest>"` records, and the concatenation
//! is framed as a `tree` object and digested. The sort is part of the hash
//! contract, not cosmetic: any deviation changes the resulting digest.

use crate::error::{Error, Result};
use crate::hash::Digest;
use crate::identifier::Identifier;
use crate::object::ObjectType;

/// Whether a directory entry is a leaf or a composite child.
///
/// The scheme distinguishes only these two modes; executable bits,
/// symlinks and submodules are not represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Opaque byte content (a file).
    Leaf,
    /// A nested tree (a directory).
    Composite,
}

impl EntryKind {
    /// The mode token emitted in tree records.
    pub fn mode_token(&self) -> &'static str {
        match self {
            EntryKind::Leaf => "100644",
            EntryKind::Composite => "40000",
        }
    }
}

/// A named child of a composite artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Leaf or composite.
    pub kind: EntryKind,
    /// Digest of the child.
    pub digest: Digest,
    /// Child name (no embedded NUL, unique within one directory).
    pub name: String,
}

impl DirectoryEntry {
    /// Create a new directory entry.
    pub fn new(kind: EntryKind, digest: Digest, name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_entry("Name cannot be empty"));
        }
        if name.contains('\0') {
            return Err(Error::invalid_entry("Name cannot contain null bytes"));
        }

        Ok(Self { kind, digest, name })
    }

    /// Create an entry from a child identifier; directory identifiers
    /// become composite entries, everything else a leaf.
    pub fn from_identifier(name: String, child: &Identifier) -> Result<Self> {
        let kind = match child.object_type {
            ObjectType::Directory => EntryKind::Composite,
            _ => EntryKind::Leaf,
        };
        Self::new(kind, child.digest, name)
    }

    /// Append this entry's record: `"<mode> <name>\0"` plus the binary
    /// (not hex) digest of the child.
    fn encode_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.kind.mode_token().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.name.as_bytes());
        buf.push(0);
        buf.extend_from_slice(self.digest.as_bytes());
    }
}

impl PartialOrd for DirectoryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DirectoryEntry {
    /// Compare by name (byte-wise) for canonical ordering.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.as_bytes().cmp(other.name.as_bytes())
    }
}

/// Address a sequence of directory entries as a composite identifier.
///
/// Order of the input is irrelevant: entries are sorted by name before
/// hashing. Fails if two entries share a name. An empty sequence is a
/// valid (empty) composite.
pub fn address_tree(entries: &[DirectoryEntry]) -> Result<Identifier> {
    let mut sorted: Vec<&DirectoryEntry> = entries.iter().collect();
    sorted.sort();

    for pair in sorted.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(Error::invalid_entry(format!(
                "Duplicate entry name: {:?}",
                pair[0].name
            )));
        }
    }

    let mut records = Vec::new();
    for entry in sorted {
        entry.encode_into(&mut records);
    }

    Ok(Identifier::new(
        ObjectType::Directory,
        Digest::hash_object("tree", &records),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::address_content;
    use crate::identifier::Codec;

    fn leaf(name: &str, content: &[u8]) -> DirectoryEntry {
        DirectoryEntry::new(
            EntryKind::Leaf,
            address_content(content).digest,
            name.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_tree_reference_vector() {
        let id = address_tree(&[]).unwrap();
        assert_eq!(
            Codec::new().format(&id),
            "swh:1:dir:4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn test_single_entry_git_vector() {
        // git: blob 83baae6... ("version 1\n") as "test.txt" gives tree d8329fc...
        let blob = address_content(b"version 1\n");
        assert_eq!(blob.digest.to_hex(), "83baae61804e65cc73a7201a7252750c76066a30");

        let entry = DirectoryEntry::from_identifier("test.txt".to_string(), &blob).unwrap();
        let tree = address_tree(&[entry]).unwrap();
        assert_eq!(tree.digest.to_hex(), "d8329fc1cc938780ffdd9f94e0d364e0ea74f579");
    }

    #[test]
    fn test_order_canonicalization() {
        let a = leaf("a", b"first");
        let b = leaf("b", b"second");

        let forward = address_tree(&[a.clone(), b.clone()]).unwrap();
        let backward = address_tree(&[b, a]).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_object_type_is_directory() {
        let id = address_tree(&[leaf("f", b"x")]).unwrap();
        assert_eq!(id.object_type, ObjectType::Directory);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let first = leaf("same", b"first");
        let second = leaf("same", b"second");
        let result = address_tree(&[first, second]);
        assert!(matches!(result, Err(Error::InvalidEntry { .. })));
    }

    #[test]
    fn test_entry_name_validation() {
        let digest = Digest::hash_bytes(b"x");
        assert!(DirectoryEntry::new(EntryKind::Leaf, digest, String::new()).is_err());
        assert!(DirectoryEntry::new(EntryKind::Leaf, digest, "a\0b".to_string()).is_err());
    }

    #[test]
    fn test_child_digest_changes_parent() {
        let before = address_tree(&[leaf("f", b"one")]).unwrap();
        let after = address_tree(&[leaf("f", b"two")]).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn test_kind_changes_parent() {
        let digest = Digest::hash_bytes(b"same child");
        let as_leaf = address_tree(&[
            DirectoryEntry::new(EntryKind::Leaf, digest, "child".to_string()).unwrap(),
        ])
        .unwrap();
        let as_composite = address_tree(&[
            DirectoryEntry::new(EntryKind::Composite, digest, "child".to_string()).unwrap(),
        ])
        .unwrap();
        assert_ne!(as_leaf, as_composite);
    }

    #[test]
    fn test_from_identifier_maps_kinds() {
        let content = address_content(b"bytes");
        let entry = DirectoryEntry::from_identifier("f".to_string(), &content).unwrap();
        assert_eq!(entry.kind, EntryKind::Leaf);

        let subtree = address_tree(&[]).unwrap();
        let entry = DirectoryEntry::from_identifier("d".to_string(), &subtree).unwrap();
        assert_eq!(entry.kind, EntryKind::Composite);
    }

    #[test]
    fn test_merkle_composition() {
        // Changing a grandchild must ripple up through the parent digest
        let child_one = address_tree(&[leaf("inner", b"one")]).unwrap();
        let child_two = address_tree(&[leaf("inner", b"two")]).unwrap();

        let parent_one = address_tree(&[
            DirectoryEntry::from_identifier("sub".to_string(), &child_one).unwrap(),
        ])
        .unwrap();
        let parent_two = address_tree(&[
            DirectoryEntry::from_identifier("sub".to_string(), &child_two).unwrap(),
        ])
        .unwrap();
        assert_ne!(parent_one, parent_two);
    }

    // Property-based tests
    use proptest::prelude::*;

    fn arb_entry() -> impl Strategy<Value = DirectoryEntry> {
        (
            prop::sample::select(vec![EntryKind::Leaf, EntryKind::Composite]),
            prop::array::uniform20(any::<u8>()),
            "[a-zA-Z0-9._-]{1,32}",
        )
            .prop_map(|(kind, digest, name)| {
                DirectoryEntry::new(kind, Digest::from_bytes(digest), name).unwrap()
            })
    }

    fn arb_unique_entries() -> impl Strategy<Value = Vec<DirectoryEntry>> {
        prop::collection::vec(arb_entry(), 0..16).prop_map(|mut entries| {
            entries.sort();
            entries.dedup_by(|a, b| a.name == b.name);
            entries
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            max_shrink_iters: 10000,
            ..ProptestConfig::default()
        })]

        /// Permutation invariance: any shuffle addresses identically
        #[test]
        fn prop_permutation_invariant(
            entries in arb_unique_entries().prop_shuffle(),
        ) {
            let mut reversed = entries.clone();
            reversed.reverse();
            prop_assert_eq!(address_tree(&entries)?, address_tree(&reversed)?);
        }

        /// Duplicate names are always rejected, wherever they appear
        #[test]
        fn prop_duplicate_names_rejected(
            mut entries in prop::collection::vec(arb_entry(), 1..8),
            duplicated in any::<prop::sample::Index>(),
        ) {
            let mut copy = entries[duplicated.index(entries.len())].clone();
            copy.digest = Digest::hash_bytes(b"different child");
            entries.push(copy);
            prop_assert!(address_tree(&entries).is_err());
        }

        /// Determinism over arbitrary entry sets
        #[test]
        fn prop_tree_deterministic(entries in arb_unique_entries()) {
            prop_assert_eq!(address_tree(&entries)?, address_tree(&entries)?);
        }
    }
}
