//! Answer selection: progression analysis, answer matching and the puzzle orchestrator

/// Fuzzy matching of predictions against candidate answers
pub mod matcher;
/// Puzzle-level control flow and the answer type
pub mod orchestrator;
/// Row and column progression analysis for 3x3 puzzles
pub mod progression;

pub use matcher::{AnswerMatcher, Solution};
pub use orchestrator::{Answer, Axis, PuzzleImages, Solver};
