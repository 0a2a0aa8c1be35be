//! # BBox Batch Rename
//!
//! Renames selected objects in one collection after the nearest selected
//! object in another, measured between world-space bounding-box centers.
//! The typical use is carrying `Rock_high` / `Tree_high` names from a
//! high-poly sculpt set onto the matching low-poly bake meshes.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        BBox Batch Rename                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Host Layer                                                      │
//! │  ├── Scene: TOML scene document (objects, collections, bounds)  │
//! │  └── RenameHost: seam between the operation and any scene model │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Operation Layer                                                 │
//! │  ├── RenameOptions: collection names + name rewrite             │
//! │  └── batch_rename / plan: resolve, gather, match, apply         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  Core                                                            │
//! │  ├── match_nearest: greedy nearest-unused-source assignment     │
//! │  └── RenameRule: strip + append name derivation                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eustress_bbox_rename::prelude::*;
//!
//! let mut scene = Scene::load("props.scene.toml".as_ref())?;
//! let report = batch_rename(&mut scene, &RenameOptions::default())?;
//! println!("{}", report.summary());
//! scene.save("props.scene.toml".as_ref())?;
//! ```

pub mod bounds;
pub mod error;
pub mod host;
pub mod matcher;
pub mod operation;
pub mod rule;
pub mod scene;

pub use bounds::LocalBounds;
pub use error::{RenameError, Result, SceneError};
pub use host::RenameHost;
pub use matcher::{match_nearest, MatchResult, SourcePool, SpatialItem};
pub use operation::{batch_rename, plan, AppliedRename, RenameOptions, RenamePlan, RenameReport};
pub use rule::RenameRule;
pub use scene::{Collection, ObjectKind, ObjectTransform, Scene, SceneObject};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient re-exports for common rename types.
pub mod prelude {
    pub use super::error::{RenameError, SceneError};
    pub use super::host::RenameHost;
    pub use super::matcher::{match_nearest, MatchResult, SpatialItem};
    pub use super::operation::{batch_rename, plan, RenameOptions, RenameReport};
    pub use super::rule::RenameRule;
    pub use super::scene::{ObjectKind, Scene, SceneObject};
}
