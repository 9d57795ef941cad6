//! Iterative-deepening search for transforms relating two figures
//!
//! Each call expands the candidate list by the primitives of one catalog
//! order, scores what is new, re-ranks everything, and records residual
//! masks for imperfect candidates. Work from shallower orders is reused.

use crate::imaging::BinaryImage;
use crate::transform::candidate::TransformCandidate;
use crate::transform::catalog::TransformCatalog;
use std::cmp::Ordering;

/// Extend `prior` (or a fresh identity seed) with the primitives of `order`
///
/// The returned list is ranked best-first by exact match score against
/// `target`, ties keeping their previous relative order. Candidates already
/// present are never dropped, so the result can seed the next order.
pub fn priority_transforms(
    source: &BinaryImage,
    target: &BinaryImage,
    prior: Option<Vec<TransformCandidate>>,
    order: usize,
    catalog: &TransformCatalog,
) -> Vec<TransformCandidate> {
    let mut candidates = prior.unwrap_or_default();
    if candidates.is_empty() {
        candidates.push(TransformCandidate::identity(source));
    }

    let identity = TransformCandidate::identity(source);
    candidates.extend(catalog.of_order(order).map(|transform| identity.then(transform)));

    for candidate in candidates.iter().filter(|c| c.score().is_none()) {
        candidate.score_against(target);
    }

    candidates.sort_by(descending_score);

    for candidate in &candidates {
        if let Some(residual) = candidate.settle_residual(target) {
            tracing::trace!(
                ops = %candidate.describe_ops(),
                add_percent = residual.add_percent,
                subtract_percent = residual.subtract_percent,
                "residual recorded"
            );
        }
    }

    candidates
}

/// Best-first ordering on exact match score; unscored candidates sink
pub fn descending_score(a: &TransformCandidate, b: &TransformCandidate) -> Ordering {
    let a = a.score().unwrap_or(f64::NEG_INFINITY);
    let b = b.score().unwrap_or(f64::NEG_INFINITY);
    b.total_cmp(&a)
}

/// Search state for one source/target pair across successive orders
#[derive(Clone, Debug)]
pub struct PriorityTransformSearch {
    source: BinaryImage,
    target: BinaryImage,
    candidates: Option<Vec<TransformCandidate>>,
    expanded_orders: usize,
}

impl PriorityTransformSearch {
    /// Start a search relating `source` to `target`
    pub const fn new(source: BinaryImage, target: BinaryImage) -> Self {
        Self {
            source,
            target,
            candidates: None,
            expanded_orders: 0,
        }
    }

    /// Expand by the primitives of `order` and return the re-ranked candidates
    pub fn expand(&mut self, order: usize, catalog: &TransformCatalog) -> &[TransformCandidate] {
        let prior = self.candidates.take();
        let ranked = priority_transforms(&self.source, &self.target, prior, order, catalog);
        self.expanded_orders += 1;
        self.candidates.insert(ranked)
    }

    /// Ranked candidates from the latest expansion
    pub fn candidates(&self) -> &[TransformCandidate] {
        self.candidates.as_deref().unwrap_or(&[])
    }

    /// Highest-ranked candidate, if any expansion has run
    pub fn best(&self) -> Option<&TransformCandidate> {
        self.candidates().first()
    }

    /// Score of the highest-ranked candidate
    pub fn top_score(&self) -> Option<f64> {
        self.best().and_then(TransformCandidate::score)
    }

    /// Number of expansions performed so far
    pub const fn expanded_orders(&self) -> usize {
        self.expanded_orders
    }

    /// Image the transforms start from
    pub const fn source(&self) -> &BinaryImage {
        &self.source
    }

    /// Image the transforms are scored against
    pub const fn target(&self) -> &BinaryImage {
        &self.target
    }
}
