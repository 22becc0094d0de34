//! Filesystem walking and artifact addressing.
//!
//! Recursion is bottom-up: every child identifier is fully resolved before
//! its parent tree is composed. Failures are reported to the caller, never
//! skipped; batch skip-and-continue policy belongs to the surrounding
//! tooling.

use crate::content::{address_content, address_content_limited};
use crate::error::{Error, Result};
use crate::identifier::Identifier;
use crate::tree::{address_tree, DirectoryEntry, EntryKind};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Options for directory walks.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Child names skipped entirely (exact component match).
    pub exclude: Vec<String>,
    /// Respect `.gitignore` files during the walk.
    pub git_ignore: bool,
    /// Reject files larger than this many bytes.
    pub max_content_size: Option<u64>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude: vec![
                ".git".to_string(),
                ".DS_Store".to_string(),
                "__pycache__".to_string(),
            ],
            git_ignore: true,
            max_content_size: None,
        }
    }
}

/// A file artifact description for downstream disclosure records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileArtifact {
    /// Content identifier of the file bytes.
    pub identifier: Identifier,
    /// File name without its directory.
    pub file_name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Address a file or directory on disk.
pub fn address_path(path: &Path, options: &WalkOptions) -> Result<Identifier> {
    let metadata = fs::symlink_metadata(path).map_err(|source| Error::Io {
        source: std::io::Error::new(
            source.kind(),
            format!("{}: {}", path.display(), source),
        ),
    })?;

    if metadata.is_file() {
        address_file(path, options)
    } else if metadata.is_dir() {
        address_directory(path, options)
    } else {
        Err(Error::invalid_entry(format!(
            "Unsupported file type: {}",
            path.display()
        )))
    }
}

/// Address a single file's bytes as a content identifier.
pub fn address_file(path: &Path, options: &WalkOptions) -> Result<Identifier> {
    let bytes = fs::read(path)?;
    match options.max_content_size {
        Some(max_size) => address_content_limited(&bytes, max_size),
        None => Ok(address_content(&bytes)),
    }
}

/// Address a file and describe it for disclosure records.
pub fn describe_file(path: &Path, options: &WalkOptions) -> Result<FileArtifact> {
    let identifier = address_file(path, options)?;
    let metadata = fs::metadata(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::invalid_entry(format!("Invalid filename: {}", path.display())))?
        .to_string();

    Ok(FileArtifact {
        identifier,
        file_name,
        size: metadata.len(),
    })
}

/// Address a directory recursively as a composite identifier.
///
/// Children named in `options.exclude` are not part of the identifier;
/// everything else contributes, and any unreadable child is an error.
pub fn address_directory(path: &Path, options: &WalkOptions) -> Result<Identifier> {
    let mut entries = Vec::new();

    let walker = ignore::WalkBuilder::new(path)
        .max_depth(Some(1)) // Only immediate children
        .hidden(false) // Include hidden files
        .git_ignore(options.git_ignore)
        .build();

    for entry in walker {
        let entry = entry?;
        let entry_path = entry.path();

        // Skip the directory itself
        if entry_path == path {
            continue;
        }

        let file_name = entry_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::invalid_entry(format!("Invalid filename: {}", entry_path.display()))
            })?
            .to_string();

        if options.exclude.iter().any(|excluded| *excluded == file_name) {
            continue;
        }

        let metadata = fs::symlink_metadata(entry_path)?;
        if metadata.is_file() {
            let child = address_file(entry_path, options)?;
            entries.push(DirectoryEntry::new(EntryKind::Leaf, child.digest, file_name)?);
        } else if metadata.is_dir() {
            let child = address_directory(entry_path, options)?;
            entries.push(DirectoryEntry::new(
                EntryKind::Composite,
                child.digest,
                file_name,
            )?);
        } else {
            // Symlinks and special files have no representation in the scheme
            return Err(Error::invalid_entry(format!(
                "Unsupported file type: {}",
                entry_path.display()
            )));
        }
    }

    address_tree(&entries)
}
