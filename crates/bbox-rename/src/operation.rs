//! # Batch Rename Operation
//!
//! Resolves the two collections, gathers their selected meshes, runs the
//! matcher and applies the derived names to the host.
//!
//! ## Table of Contents
//! 1. RenameOptions - User-facing parameters
//! 2. RenamePlan - Matching without mutation
//! 3. RenameReport - Outcome of an applied run
//! 4. plan / batch_rename - Entry points

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::{RenameError, Result};
use crate::host::RenameHost;
use crate::matcher::{match_nearest, MatchResult, SpatialItem};
use crate::rule::{RenameRule, DEFAULT_APPEND, DEFAULT_STRIP};

/// Default collection the names are taken from
pub const DEFAULT_FROM_COLLECTION: &str = "high_poly";
/// Default collection whose objects get renamed
pub const DEFAULT_TO_COLLECTION: &str = "low_poly";

// ============================================================================
// 1. RenameOptions - User-facing parameters
// ============================================================================

/// Parameters of one batch rename. Every field is optional in a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptions {
    /// Collection used as rename source
    pub from_collection: String,
    /// Collection that will be renamed
    pub to_collection: String,
    /// Substring removed from source object names
    pub name_from: String,
    /// Substring appended to renamed objects
    pub name_to: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            from_collection: DEFAULT_FROM_COLLECTION.to_string(),
            to_collection: DEFAULT_TO_COLLECTION.to_string(),
            name_from: DEFAULT_STRIP.to_string(),
            name_to: DEFAULT_APPEND.to_string(),
        }
    }
}

impl RenameOptions {
    /// Load options from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| RenameError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
            .map_err(|e| RenameError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn rule(&self) -> RenameRule {
        RenameRule::new(self.name_from.clone(), self.name_to.clone())
    }
}

// ============================================================================
// 2. RenamePlan - Matching without mutation
// ============================================================================

/// Inputs and match results of a run, before anything is renamed.
#[derive(Debug, Clone)]
pub struct RenamePlan<I> {
    pub sources: Vec<SpatialItem<I>>,
    pub targets: Vec<SpatialItem<I>>,
    /// One entry per target, in target order
    pub results: Vec<MatchResult<I>>,
}

impl<I: Clone + PartialEq> RenamePlan<I> {
    fn target_name(&self, id: &I) -> String {
        self.targets
            .iter()
            .find(|t| t.id == *id)
            .map(|t| t.name.clone())
            .unwrap_or_default()
    }

    /// Report as if every derived name were applied verbatim
    pub fn preview(&self) -> RenameReport<I> {
        let mut report = RenameReport::new(self.sources.len(), self.targets.len());
        for result in &self.results {
            match result {
                MatchResult::Matched {
                    target_id,
                    source_id,
                    new_name,
                    distance,
                } => report.renamed.push(AppliedRename {
                    target_id: target_id.clone(),
                    source_id: source_id.clone(),
                    old_name: self.target_name(target_id),
                    requested_name: new_name.clone(),
                    new_name: new_name.clone(),
                    distance: *distance,
                }),
                MatchResult::Unmatched { target_id } => report.unmatched.push(target_id.clone()),
            }
        }
        report
    }
}

// ============================================================================
// 3. RenameReport - Outcome of an applied run
// ============================================================================

/// One target rename
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedRename<I> {
    pub target_id: I,
    pub source_id: I,
    pub old_name: String,
    /// Name derived from the source
    pub requested_name: String,
    /// Name the host applied; differs from `requested_name` on collisions
    pub new_name: String,
    pub distance: f64,
}

/// Aggregate outcome of a batch rename
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenameReport<I> {
    /// Selected source meshes considered
    pub sources: usize,
    /// Selected target meshes considered
    pub targets: usize,
    pub renamed: Vec<AppliedRename<I>>,
    /// Targets left with their old name
    pub unmatched: Vec<I>,
}

impl<I> RenameReport<I> {
    fn new(sources: usize, targets: usize) -> Self {
        Self {
            sources,
            targets,
            renamed: Vec::new(),
            unmatched: Vec::new(),
        }
    }

    /// Sources no target claimed
    pub fn unused_sources(&self) -> usize {
        self.sources.saturating_sub(self.renamed.len())
    }

    pub fn summary(&self) -> String {
        format!(
            "BBox batch rename complete (selected only): {} renamed, {} unmatched",
            self.renamed.len(),
            self.unmatched.len()
        )
    }
}

// ============================================================================
// 4. plan / batch_rename - Entry points
// ============================================================================

/// Resolve collections, gather selected meshes and match them.
///
/// Fails with [`RenameError::CollectionNotFound`] listing every missing
/// collection; the host is only read.
pub fn plan<H: RenameHost>(host: &H, options: &RenameOptions) -> Result<RenamePlan<H::Id>> {
    let missing: Vec<String> = [&options.from_collection, &options.to_collection]
        .into_iter()
        .filter(|name| !host.has_collection(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(RenameError::CollectionNotFound { missing });
    }

    let sources = host.selected_meshes(&options.from_collection)?;
    let targets = host.selected_meshes(&options.to_collection)?;
    info!(
        "Matching {} target(s) in '{}' against {} source(s) in '{}'",
        targets.len(),
        options.to_collection,
        sources.len(),
        options.from_collection
    );

    let results = match_nearest(&sources, &targets, &options.rule());
    Ok(RenamePlan {
        sources,
        targets,
        results,
    })
}

/// Run a full batch rename against `host`.
///
/// Renames are applied one target at a time; unmatched targets keep their
/// names. Nothing is touched when a collection is missing.
pub fn batch_rename<H: RenameHost>(host: &mut H, options: &RenameOptions) -> Result<RenameReport<H::Id>> {
    let plan = plan(&*host, options)?;
    let mut report = RenameReport::new(plan.sources.len(), plan.targets.len());

    for result in &plan.results {
        match result {
            MatchResult::Matched {
                target_id,
                source_id,
                new_name,
                distance,
            } => {
                let old_name = plan.target_name(target_id);
                let applied = host.rename(target_id, new_name)?;
                if applied == *new_name {
                    info!("Renamed '{}' -> '{}'", old_name, applied);
                } else {
                    info!("Renamed '{}' -> '{}' ('{}' is taken)", old_name, applied, new_name);
                }
                report.renamed.push(AppliedRename {
                    target_id: target_id.clone(),
                    source_id: source_id.clone(),
                    old_name,
                    requested_name: new_name.clone(),
                    new_name: applied,
                    distance: *distance,
                });
            }
            MatchResult::Unmatched { target_id } => {
                warn!("No unused source left for '{}'", plan.target_name(target_id));
                report.unmatched.push(target_id.clone());
            }
        }
    }

    info!("{}", report.summary());
    Ok(report)
}
