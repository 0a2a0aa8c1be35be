//! Host seam for the rename operation.
//!
//! The operation never reads selection or collection state on its own; it
//! asks the host for explicit item lists and hands renames back.

use crate::error::SceneError;
use crate::matcher::SpatialItem;

/// A scene model the batch rename can read from and write to.
pub trait RenameHost {
    /// Stable object identity within the host
    type Id: Clone + PartialEq + std::fmt::Debug;

    /// Whether a collection with exactly this name exists
    fn has_collection(&self, name: &str) -> bool;

    /// Selected mesh objects of a collection, in collection order, with
    /// their world-space bounding-box centers
    fn selected_meshes(&self, collection: &str) -> Result<Vec<SpatialItem<Self::Id>>, SceneError>;

    /// Set an object's display name. Returns the name actually applied,
    /// which may differ when the host keeps names unique.
    fn rename(&mut self, id: &Self::Id, new_name: &str) -> Result<String, SceneError>;
}
