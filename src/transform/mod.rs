//! Transform catalog, candidate hypotheses and the iterative-deepening search over them

/// Transformation hypotheses with lazily computed scores and residuals
pub mod candidate;
/// Primitive figure operations and their search orders
pub mod catalog;
/// Ranked candidate search relating two figures
pub mod search;

pub use candidate::TransformCandidate;
pub use catalog::{StaticTransform, TransformCatalog};
pub use search::PriorityTransformSearch;
