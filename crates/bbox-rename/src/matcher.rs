//! Greedy nearest-unused-source matching
//!
//! Each target, in input order, claims the nearest source that no earlier
//! target has claimed. This is a single non-backtracking pass and does not
//! minimize the total distance over all pairs.
//!
//! ## Table of Contents
//! 1. SpatialItem - Identified point with a display name
//! 2. SourcePool - Sources plus per-invocation consumed flags
//! 3. MatchResult - Per-target outcome
//! 4. match_nearest - Entry point

use glam::DVec3;
use tracing::debug;

use crate::rule::RenameRule;

// ============================================================================
// 1. SpatialItem - Identified point with a display name
// ============================================================================

/// One object's nominal position for matching.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialItem<I> {
    /// Opaque identifier, handed back in results
    pub id: I,
    /// Current display name
    pub name: String,
    /// World-space bounding-box center
    pub center: DVec3,
}

impl<I> SpatialItem<I> {
    pub fn new(id: I, name: impl Into<String>, center: DVec3) -> Self {
        Self {
            id,
            name: name.into(),
            center,
        }
    }
}

// ============================================================================
// 2. SourcePool - Sources plus per-invocation consumed flags
// ============================================================================

/// Candidate sources for one matching run.
///
/// An entry is consumed at most once and is never a candidate afterwards.
#[derive(Debug)]
pub struct SourcePool<'a, I> {
    items: &'a [SpatialItem<I>],
    consumed: Vec<bool>,
}

impl<'a, I> SourcePool<'a, I> {
    pub fn new(items: &'a [SpatialItem<I>]) -> Self {
        Self {
            items,
            consumed: vec![false; items.len()],
        }
    }

    /// Index and distance of the nearest unconsumed source.
    ///
    /// Strict `<` against the best so far: on an exact distance tie the
    /// earliest source wins. A NaN distance never wins.
    pub fn nearest(&self, point: DVec3) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        let mut best_distance = f64::INFINITY;

        for (index, item) in self.items.iter().enumerate() {
            if self.is_consumed(index) {
                continue;
            }
            let distance = item.center.distance(point);
            if distance < best_distance {
                best_distance = distance;
                best = Some((index, distance));
            }
        }

        best
    }

    /// Mark a source as claimed. Returns the item.
    pub fn consume(&mut self, index: usize) -> &'a SpatialItem<I> {
        debug_assert!(!self.consumed[index], "source {index} consumed twice");
        self.consumed[index] = true;
        &self.items[index]
    }

    pub fn is_consumed(&self, index: usize) -> bool {
        self.consumed[index]
    }

    /// Number of sources still available
    pub fn remaining(&self) -> usize {
        self.consumed.iter().filter(|c| !**c).count()
    }
}

// ============================================================================
// 3. MatchResult - Per-target outcome
// ============================================================================

/// Outcome for a single target.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<I> {
    /// Target paired with a source; `new_name` is already derived
    Matched {
        target_id: I,
        source_id: I,
        new_name: String,
        distance: f64,
    },
    /// Every source was already claimed (or there were none)
    Unmatched { target_id: I },
}

impl<I> MatchResult<I> {
    pub fn target_id(&self) -> &I {
        match self {
            MatchResult::Matched { target_id, .. } | MatchResult::Unmatched { target_id } => target_id,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }
}

// ============================================================================
// 4. match_nearest - Entry point
// ============================================================================

/// Pair every target with the nearest unused source.
///
/// Returns exactly one result per target, in target order.
pub fn match_nearest<I>(
    sources: &[SpatialItem<I>],
    targets: &[SpatialItem<I>],
    rule: &RenameRule,
) -> Vec<MatchResult<I>>
where
    I: Clone + std::fmt::Debug,
{
    let mut pool = SourcePool::new(sources);

    targets
        .iter()
        .map(|target| match pool.nearest(target.center) {
            Some((index, distance)) => {
                let source = pool.consume(index);
                let new_name = rule.derive(&source.name);
                debug!(
                    "Matched target {:?} ({}) to source {:?} ({}) at {:.4}",
                    target.id, target.name, source.id, source.name, distance
                );
                MatchResult::Matched {
                    target_id: target.id.clone(),
                    source_id: source.id.clone(),
                    new_name,
                    distance,
                }
            }
            None => {
                debug!(
                    "No source left for target {:?} ({}), {} remaining",
                    target.id,
                    target.name,
                    pool.remaining()
                );
                MatchResult::Unmatched {
                    target_id: target.id.clone(),
                }
            }
        })
        .collect()
}
