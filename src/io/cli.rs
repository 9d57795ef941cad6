//! Command-line interface for solving one problem or a directory of problems

use crate::io::configuration::{MATCHED_IMAGE_THRESHOLD, SolverConfig};
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::io::problem::Problem;
use crate::io::progress::ProgressManager;
use crate::solver::orchestrator::{Answer, Solver};
use crate::transform::TransformCatalog;
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "ravensolve")]
#[command(
    author,
    version,
    about = "Solve visual analogy puzzles by progression analysis and transform search"
)]
/// Command-line arguments for the solver
pub struct Cli {
    /// Problem directory, or a directory containing problem directories
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Suppress progress output and informational logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Write per-problem diagnostic images below this directory
    #[arg(short, long, value_name = "DIR")]
    pub dump: Option<PathBuf>,

    /// Write a CSV of answers and outcomes to this file
    #[arg(short, long, value_name = "FILE")]
    pub results: Option<PathBuf>,

    /// Minimum fuzzy match score for an answer to be chosen
    #[arg(short, long, default_value_t = MATCHED_IMAGE_THRESHOLD)]
    pub threshold: f64,

    /// Abstain on 3x3 puzzles the progression analysis cannot decide
    #[arg(long)]
    pub no_fallback: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Solver settings with the command-line overrides applied
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            matched_image_threshold: self.threshold,
            search_fallback: !self.no_fallback,
            ..SolverConfig::default()
        }
    }
}

/// How an answer compares with the expected one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Chosen answer equals the expected answer
    Correct,
    /// Chosen answer differs from the expected answer
    Incorrect,
    /// The solver abstained
    Skipped,
    /// No expected answer is known
    Ungraded,
}

impl Outcome {
    /// Grade `answer` against an optional expected answer
    pub fn grade(answer: Answer, expected: Option<usize>) -> Self {
        match (answer, expected) {
            (Answer::Abstain, _) => Self::Skipped,
            (Answer::Chosen(_), None) => Self::Ungraded,
            (Answer::Chosen(chosen), Some(expected)) if chosen == expected => Self::Correct,
            (Answer::Chosen(_), Some(_)) => Self::Incorrect,
        }
    }

    /// Lowercase label used in reports
    pub const fn label(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
            Self::Skipped => "skipped",
            Self::Ungraded => "ungraded",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of solving one problem
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemRecord {
    /// Problem name
    pub name: String,
    /// Solver response
    pub answer: Answer,
    /// Expected answer, if known
    pub expected: Option<usize>,
}

impl ProblemRecord {
    /// Outcome of this record
    pub fn outcome(&self) -> Outcome {
        Outcome::grade(self.answer, self.expected)
    }

    /// One CSV row: `problem,answer,expected,outcome`
    pub fn csv_row(&self) -> String {
        let expected = self
            .expected
            .map_or_else(String::new, |expected| expected.to_string());
        format!(
            "{},{},{},{}",
            csv_field(&self.name),
            self.answer.code(),
            expected,
            self.outcome()
        )
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Tally of outcomes across a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Problems answered correctly
    pub correct: usize,
    /// Problems answered incorrectly
    pub incorrect: usize,
    /// Problems the solver abstained on
    pub skipped: usize,
    /// Answered problems without an expected answer
    pub ungraded: usize,
}

impl BatchSummary {
    /// Count one outcome
    pub const fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Incorrect => self.incorrect += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Ungraded => self.ungraded += 1,
        }
    }

    /// Total problems counted
    pub const fn total(&self) -> usize {
        self.correct + self.incorrect + self.skipped + self.ungraded
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correct, {} incorrect, {} skipped, {} ungraded",
            self.correct, self.incorrect, self.skipped, self.ungraded
        )
    }
}

/// Write records as CSV with a header row
///
/// # Errors
///
/// Returns an error if the file or its parent directory cannot be written
pub fn write_results_csv(path: &Path, records: &[ProblemRecord]) -> Result<()> {
    let mut contents = String::from("problem,answer,expected,outcome\n");
    for record in records {
        contents.push_str(&record.csv_row());
        contents.push('\n');
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }
    std::fs::write(path, contents).map_err(file_system(path, "write results"))
}

/// Solves every problem under the CLI target with progress tracking
pub struct ProblemProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ProblemProcessor {
    /// Create a new problem processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every problem and return the outcome tally
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The threshold is outside `[0, 1]`
    /// - The target is neither a problem directory nor a directory of them
    /// - The results file cannot be written
    pub fn process(&mut self) -> Result<BatchSummary> {
        let config = self.cli.solver_config();
        config.validate()?;

        let mut solver = Solver::new(config, TransformCatalog::default());
        if let Some(dir) = &self.cli.dump {
            solver = solver.with_dump_dir(dir);
        }

        let directories = self.collect_problems()?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(directories.len());
        }

        let mut summary = BatchSummary::default();
        let mut records = Vec::with_capacity(directories.len());
        for directory in &directories {
            let record = self.process_problem(&solver, directory);
            summary.record(record.outcome());
            records.push(record);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        if let Some(path) = &self.cli.results {
            write_results_csv(path, &records)?;
        }

        tracing::info!(problems = summary.total(), %summary, "batch finished");
        Ok(summary)
    }

    fn process_problem(&mut self, solver: &Solver, directory: &Path) -> ProblemRecord {
        let fallback_name = directory
            .file_name()
            .map_or_else(
                || directory.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            );

        if let Some(ref pm) = self.progress_manager {
            pm.start_problem(&fallback_name);
        }

        let record = match Problem::from_directory(directory) {
            Ok(problem) => ProblemRecord {
                answer: solver.solve(&problem),
                name: problem.name().to_string(),
                expected: problem.expected_answer(),
            },
            Err(err) => {
                tracing::warn!(problem = %fallback_name, %err, "skipping unreadable problem");
                ProblemRecord {
                    name: fallback_name,
                    answer: Answer::Abstain,
                    expected: None,
                }
            }
        };

        tracing::info!(
            problem = %record.name,
            answer = %record.answer,
            outcome = %record.outcome(),
            "problem done"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_problem();
        }
        record
    }

    fn collect_problems(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if Problem::is_problem_directory(target) {
            return Ok(vec![target.clone()]);
        }
        if !target.is_dir() {
            return Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a problem directory or a directory of problems",
            ));
        }

        let mut directories = Vec::new();
        for entry in std::fs::read_dir(target).map_err(file_system(target, "read directory"))? {
            let path = entry.map_err(file_system(target, "read directory"))?.path();
            if Problem::is_problem_directory(&path) {
                directories.push(path);
            }
        }
        directories.sort();
        Ok(directories)
    }
}
