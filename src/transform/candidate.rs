//! Transformation hypotheses built from catalog primitives
//!
//! A candidate's score and residual masks are filled in lazily by the search
//! and can only be set once. The first target a candidate is scored against
//! stays its target for the rest of its life.

use crate::imaging::BinaryImage;
use crate::imaging::compare::{images_equal, match_score};
use crate::transform::catalog::StaticTransform;
use std::cell::OnceCell;
use std::fmt;

/// Pixel-level correction reconciling a candidate's output with its target
#[derive(Clone, Debug)]
pub struct Residual {
    /// Pixels black in the target but missing from the candidate image
    pub add_image: BinaryImage,
    /// Pixels black in the candidate image but absent from the target
    pub subtract_image: BinaryImage,
    /// Added pixels as a percentage of the image area
    pub add_percent: f64,
    /// Subtracted pixels as a percentage of the image area
    pub subtract_percent: f64,
}

impl Residual {
    /// Compute the masks turning `current` into `target`
    pub fn between(current: &BinaryImage, target: &BinaryImage) -> Self {
        let current = current.aligned_to(target);
        let add_image = target.difference(&current);
        let subtract_image = current.difference(target);

        Self {
            add_percent: add_image.black_percent(),
            subtract_percent: subtract_image.black_percent(),
            add_image,
            subtract_image,
        }
    }
}

/// A sequence of primitives applied to a source image, with its lazily computed scores
#[derive(Clone, Debug)]
pub struct TransformCandidate {
    ops: Vec<StaticTransform>,
    current_image: BinaryImage,
    score: OnceCell<f64>,
    residual: OnceCell<Residual>,
}

impl TransformCandidate {
    /// The do-nothing hypothesis: the source image itself
    pub fn identity(source: &BinaryImage) -> Self {
        Self {
            ops: Vec::new(),
            current_image: source.clone(),
            score: OnceCell::new(),
            residual: OnceCell::new(),
        }
    }

    /// A new unscored candidate extending this one by a primitive
    #[must_use]
    pub fn then(&self, transform: StaticTransform) -> Self {
        let mut ops = self.ops.clone();
        ops.push(transform);
        Self {
            ops,
            current_image: transform.apply(&self.current_image),
            score: OnceCell::new(),
            residual: OnceCell::new(),
        }
    }

    /// Primitives applied, in order
    pub fn ops(&self) -> &[StaticTransform] {
        &self.ops
    }

    /// Whether no primitive has been applied
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// Source image after applying the primitives
    pub const fn current_image(&self) -> &BinaryImage {
        &self.current_image
    }

    /// Exact match score against the target, if computed yet
    pub fn score(&self) -> Option<f64> {
        self.score.get().copied()
    }

    /// Residual masks, if computed yet
    pub fn residual(&self) -> Option<&Residual> {
        self.residual.get()
    }

    /// Score against `target`, computing it on first use only
    pub fn score_against(&self, target: &BinaryImage) -> f64 {
        *self
            .score
            .get_or_init(|| match_score(&self.current_image, target, None))
    }

    /// Record residual masks toward `target` unless the candidate already matches it
    ///
    /// Returns the stored residual, which is never replaced once present.
    pub fn settle_residual(&self, target: &BinaryImage) -> Option<&Residual> {
        if self.residual.get().is_none() && images_equal(&self.current_image, target) {
            return None;
        }
        Some(
            self.residual
                .get_or_init(|| Residual::between(&self.current_image, target)),
        )
    }

    /// Predict a solution by replaying the primitives on `image` and blending in the residual
    pub fn apply_to(&self, image: &BinaryImage) -> BinaryImage {
        let transformed = self
            .ops
            .iter()
            .fold(image.clone(), |current, op| op.apply(&current));

        match self.residual.get() {
            Some(residual) => transformed
                .union(&residual.add_image)
                .difference(&residual.subtract_image),
            None => transformed,
        }
    }

    /// Human-readable list of the applied primitives
    pub fn describe_ops(&self) -> String {
        if self.ops.is_empty() {
            return "identity".to_string();
        }
        self.ops
            .iter()
            .map(|op| op.name())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

impl fmt::Display for TransformCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score() {
            Some(score) => write!(f, "[{}] score {score:.4}", self.describe_ops()),
            None => write!(f, "[{}] unscored", self.describe_ops()),
        }
    }
}
