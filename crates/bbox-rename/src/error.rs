//! Error types for bbox-rename
//!
//! ## Table of Contents
//! 1. SceneError - Scene document loading, validation and lookups
//! 2. RenameError - Batch rename operation

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the scene document.
#[derive(Error, Debug)]
pub enum SceneError {
    /// File I/O error
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error
    #[error("Failed to parse scene: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize scene: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Two objects share one id
    #[error("Duplicate object id {0}")]
    DuplicateObject(Uuid),

    /// Two collections share one name
    #[error("Duplicate collection name '{0}'")]
    DuplicateCollection(String),

    /// A collection lists an id that no object carries
    #[error("Collection '{collection}' references unknown object {id}")]
    UnknownMember { collection: String, id: Uuid },

    /// A collection lists the same object twice
    #[error("Collection '{collection}' lists object {id} more than once")]
    DuplicateMember { collection: String, id: Uuid },

    /// Lookup of an id that is not in the scene
    #[error("Object not found: {0}")]
    ObjectNotFound(Uuid),

    /// Parent chain loops back on itself
    #[error("Parent cycle detected at object {0}")]
    ParentCycle(Uuid),

    /// Parent id does not resolve
    #[error("Object {child} has unknown parent {parent}")]
    UnknownParent { child: Uuid, parent: Uuid },
}

/// Errors that can occur in a batch rename.
#[derive(Error, Debug)]
pub enum RenameError {
    /// One or both named collections are missing; nothing was renamed
    #[error("One or both collections not found: {}", .missing.join(", "))]
    CollectionNotFound { missing: Vec<String> },

    /// Rename options file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Host scene failure
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Result type for rename operations
pub type Result<T> = std::result::Result<T, RenameError>;
