//! Visual analogy solver for Raven's progressive-matrix style puzzles
//!
//! Given a 2x2 (`A : B :: C : ?`) or 3x3 grid of binary figures and a set of
//! candidate answers, the solver either picks the answer that continues the
//! pattern or abstains. 3x3 puzzles are first read as numeric progressions
//! of pixel statistics along rows and columns; otherwise the solver searches
//! a catalog of image transforms for the one relating neighbouring cells and
//! applies it to predict the missing cell.

#![forbid(unsafe_code)]

/// Binary rasters and pixel comparison primitives
pub mod imaging;
/// Input/output operations, configuration and error handling
pub mod io;
/// Progression analysis, answer matching and puzzle orchestration
pub mod solver;
/// Transform catalog and iterative-deepening search
pub mod transform;

pub use io::error::{Result, SolverError};
