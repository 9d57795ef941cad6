//! Puzzle-level control flow: progression analysis, transform search and abstention
//!
//! A 3x3 puzzle is first run through the progression analysis. When that is
//! not decisive (and for every 2x2 puzzle) the solver searches for the
//! transform relating the source cell to one of its neighbours, deepening one
//! catalog order at a time, and applies it to the other neighbour to predict
//! the missing cell.

use crate::imaging::BinaryImage;
use crate::io::configuration::SolverConfig;
use crate::io::error::{Result, invalid_problem};
use crate::io::image::{export_attempt, load_puzzle};
use crate::io::problem::{Problem, ProblemShape};
use crate::solver::matcher::AnswerMatcher;
use crate::solver::progression::progression_answer;
use crate::transform::{PriorityTransformSearch, TransformCatalog};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

/// Direction along which a relation between cells is read
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Along a row
    Horizontal,
    /// Down a column
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// The solver's final response to a puzzle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Answer {
    /// 1-based index of the chosen answer figure
    Chosen(usize),
    /// No hypothesis was confident enough
    Abstain,
}

impl Answer {
    /// Integer code: the 1-based answer index, or `-1` when abstaining
    pub fn code(self) -> i64 {
        match self {
            Self::Chosen(index) => i64::try_from(index).unwrap_or(-1),
            Self::Abstain => -1,
        }
    }

    /// Chosen answer index, if any
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Chosen(index) => Some(index),
            Self::Abstain => None,
        }
    }

    /// Whether the solver declined to answer
    pub const fn is_abstain(self) -> bool {
        matches!(self, Self::Abstain)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chosen(index) => write!(f, "{index}"),
            Self::Abstain => f.write_str("abstain"),
        }
    }
}

/// Decoded and size-normalized figures of one puzzle
#[derive(Clone, Debug)]
pub struct PuzzleImages {
    name: String,
    shape: ProblemShape,
    grid: Vec<BinaryImage>,
    answers: Vec<BinaryImage>,
}

impl PuzzleImages {
    /// Bundle grid cells (row by row) and candidate answers
    ///
    /// # Errors
    ///
    /// Returns an error if the number of grid cells or answers does not fit the shape
    pub fn new(
        name: impl Into<String>,
        shape: ProblemShape,
        grid: Vec<BinaryImage>,
        answers: Vec<BinaryImage>,
    ) -> Result<Self> {
        let name = name.into();
        if grid.len() != shape.grid_keys().len() {
            return Err(invalid_problem(
                &name,
                &format!(
                    "a {shape} puzzle needs {} grid cells, got {}",
                    shape.grid_keys().len(),
                    grid.len()
                ),
            ));
        }
        if answers.len() != shape.answer_keys().len() {
            return Err(invalid_problem(
                &name,
                &format!(
                    "a {shape} puzzle needs {} answers, got {}",
                    shape.answer_keys().len(),
                    answers.len()
                ),
            ));
        }
        Ok(Self {
            name,
            shape,
            grid,
            answers,
        })
    }

    /// Problem name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Puzzle layout
    pub const fn shape(&self) -> ProblemShape {
        self.shape
    }

    /// Known grid cells, row by row
    pub fn grid(&self) -> &[BinaryImage] {
        &self.grid
    }

    /// Candidate answers in answer order
    pub fn answers(&self) -> &[BinaryImage] {
        &self.answers
    }
}

/// Pick the axis whose best transform relates its cells more closely
///
/// Equal scores go to the horizontal axis; an axis without a scored candidate
/// never wins against one that has.
pub fn choose_search_axis(horizontal: Option<f64>, vertical: Option<f64>) -> Axis {
    let horizontal = horizontal.unwrap_or(f64::NEG_INFINITY);
    let vertical = vertical.unwrap_or(f64::NEG_INFINITY);
    if vertical > horizontal {
        Axis::Vertical
    } else {
        Axis::Horizontal
    }
}

/// Answers puzzles by progression analysis and transform search
#[derive(Clone, Debug)]
pub struct Solver {
    config: SolverConfig,
    catalog: TransformCatalog,
    matcher: AnswerMatcher,
    dump_dir: Option<PathBuf>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default(), TransformCatalog::default())
    }
}

impl Solver {
    /// Create a solver with the given settings and primitive catalog
    pub fn new(config: SolverConfig, catalog: TransformCatalog) -> Self {
        Self {
            matcher: AnswerMatcher::from_config(&config),
            config,
            catalog,
            dump_dir: None,
        }
    }

    /// Write diagnostics of each transform search attempt below `dir`
    #[must_use]
    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    /// Settings in use
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Primitive catalog in use
    pub const fn catalog(&self) -> &TransformCatalog {
        &self.catalog
    }

    /// Solve a problem, abstaining when its figures cannot be loaded
    pub fn solve(&self, problem: &Problem) -> Answer {
        match self.try_solve(problem) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!(problem = problem.name(), %err, "abstaining on unloadable problem");
                Answer::Abstain
            }
        }
    }

    /// Solve a problem, reporting load failures as errors
    ///
    /// # Errors
    ///
    /// Returns an error if a figure is missing or cannot be decoded
    pub fn try_solve(&self, problem: &Problem) -> Result<Answer> {
        let start = Instant::now();
        let puzzle = load_puzzle(problem)?;
        let answer = self.solve_images(&puzzle);
        tracing::info!(
            problem = puzzle.name(),
            %answer,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "solved"
        );
        Ok(answer)
    }

    /// Solve a puzzle whose figures are already decoded
    pub fn solve_images(&self, puzzle: &PuzzleImages) -> Answer {
        let answers = puzzle.answers();
        match puzzle.shape() {
            ProblemShape::TwoByTwo => {
                let Ok([a, b, c]) = <&[BinaryImage; 3]>::try_from(puzzle.grid()) else {
                    return Answer::Abstain;
                };
                self.transform_search_answer(puzzle.name(), a, b, c, answers)
            }
            ProblemShape::ThreeByThree => {
                let Ok(grid) = <&[BinaryImage; 8]>::try_from(puzzle.grid()) else {
                    return Answer::Abstain;
                };

                if let Some(verdict) = progression_answer(grid, answers, &self.config) {
                    tracing::debug!(
                        axis = %verdict.axis,
                        answer = verdict.best.answer,
                        gap = verdict.gap,
                        "progression decided"
                    );
                    return Answer::Chosen(verdict.best.answer);
                }

                if !self.config.search_fallback {
                    tracing::debug!(problem = puzzle.name(), "progression undecided");
                    return Answer::Abstain;
                }

                let [_, _, _, _, e, f, _, h] = grid;
                self.transform_search_answer(puzzle.name(), e, f, h, answers)
            }
        }
    }

    /// Deepen the transform search one catalog order at a time until an answer matches
    ///
    /// `horizontal` is the cell after `source` in its row and `vertical` the
    /// cell below it; a transform found along one axis is applied to the
    /// reference of the other.
    pub fn transform_search_answer(
        &self,
        name: &str,
        source: &BinaryImage,
        horizontal: &BinaryImage,
        vertical: &BinaryImage,
        answers: &[BinaryImage],
    ) -> Answer {
        let mut horizontal_search = PriorityTransformSearch::new(source.clone(), horizontal.clone());
        let mut vertical_search = PriorityTransformSearch::new(source.clone(), vertical.clone());
        let mut last_predictions = Vec::new();
        let mut last_start = vertical;

        for order in 0..=self.catalog.max_order() {
            horizontal_search.expand(order, &self.catalog);
            vertical_search.expand(order, &self.catalog);

            let axis = choose_search_axis(horizontal_search.top_score(), vertical_search.top_score());
            let (search, start) = match axis {
                Axis::Horizontal => (&horizontal_search, vertical),
                Axis::Vertical => (&vertical_search, horizontal),
            };

            let predictions: Vec<BinaryImage> = search
                .candidates()
                .iter()
                .map(|candidate| {
                    tracing::debug!(
                        %axis,
                        order,
                        ops = %candidate.describe_ops(),
                        score = candidate.score().unwrap_or_default(),
                        add_percent = candidate.residual().map_or(0.0, |r| r.add_percent),
                        subtract_percent = candidate.residual().map_or(0.0, |r| r.subtract_percent),
                        "candidate"
                    );
                    candidate.apply_to(start)
                })
                .collect();

            if let Some(solution) = self.matcher.find_matching_answer(&predictions, answers) {
                tracing::debug!(problem = name, %axis, order, %solution, "transform search matched");
                self.dump_attempt(name, start, &predictions);
                return Answer::Chosen(solution.answer);
            }

            last_predictions = predictions;
            last_start = start;
        }

        tracing::debug!(problem = name, "transform search exhausted the catalog");
        self.dump_attempt(name, last_start, &last_predictions);
        Answer::Abstain
    }

    fn dump_attempt(&self, name: &str, start: &BinaryImage, predictions: &[BinaryImage]) {
        let Some(dir) = &self.dump_dir else {
            return;
        };
        let safe_name: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if let Err(err) = export_attempt(&dir.join(safe_name), start, predictions) {
            tracing::warn!(problem = name, %err, "could not export diagnostics");
        }
    }
}
