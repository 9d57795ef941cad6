//! Problem descriptions: puzzle name, shape, and where each figure lives
//!
//! A problem directory holds one PNG per figure, named by its key (`A.png`
//! .. `H.png` for the grid, `1.png` .. `8.png` for the answers). An optional
//! `ProblemData.txt` gives the name on its first line and the shape (`2x2`
//! or `3x3`) on its second; an optional `ProblemAnswer.txt` holds the
//! expected answer.

use crate::io::configuration::{FIGURE_EXTENSION, PROBLEM_ANSWER_FILE, PROBLEM_DATA_FILE};
use crate::io::error::{Result, SolverError, file_system, invalid_problem};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Layout of an analogy puzzle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemShape {
    /// `A : B :: C : ?` with six candidate answers
    TwoByTwo,
    /// Three rows of three with the last cell missing and eight candidate answers
    ThreeByThree,
}

impl ProblemShape {
    const TWO_BY_TWO_GRID: [&'static str; 3] = ["A", "B", "C"];
    const THREE_BY_THREE_GRID: [&'static str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];
    const SIX_ANSWERS: [&'static str; 6] = ["1", "2", "3", "4", "5", "6"];
    const EIGHT_ANSWERS: [&'static str; 8] = ["1", "2", "3", "4", "5", "6", "7", "8"];

    /// Parse a shape tag such as `2x2` or `3x3`
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "2x2" => Some(Self::TwoByTwo),
            "3x3" => Some(Self::ThreeByThree),
            _ => None,
        }
    }

    /// Shape tag as written in problem descriptions
    pub const fn label(self) -> &'static str {
        match self {
            Self::TwoByTwo => "2x2",
            Self::ThreeByThree => "3x3",
        }
    }

    /// Keys of the given grid cells, row by row
    pub const fn grid_keys(self) -> &'static [&'static str] {
        match self {
            Self::TwoByTwo => &Self::TWO_BY_TWO_GRID,
            Self::ThreeByThree => &Self::THREE_BY_THREE_GRID,
        }
    }

    /// Keys of the candidate answers in answer order
    pub const fn answer_keys(self) -> &'static [&'static str] {
        match self {
            Self::TwoByTwo => &Self::SIX_ANSWERS,
            Self::ThreeByThree => &Self::EIGHT_ANSWERS,
        }
    }
}

impl fmt::Display for ProblemShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single puzzle and the locations of its figures
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    name: String,
    shape: ProblemShape,
    figures: BTreeMap<String, PathBuf>,
    expected_answer: Option<usize>,
}

impl Problem {
    /// Create a problem with no figures yet
    pub fn new(name: impl Into<String>, shape: ProblemShape) -> Self {
        Self {
            name: name.into(),
            shape,
            figures: BTreeMap::new(),
            expected_answer: None,
        }
    }

    /// Register the image file for a figure key
    #[must_use]
    pub fn with_figure(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.figures.insert(key.into(), path.into());
        self
    }

    /// Record the known correct answer
    #[must_use]
    pub fn with_expected_answer(mut self, answer: usize) -> Self {
        self.expected_answer = Some(answer);
        self
    }

    /// Load a problem from its directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory cannot be read
    /// - `ProblemData.txt` exists but has no recognizable shape
    /// - `ProblemAnswer.txt` exists but does not hold a positive integer
    pub fn from_directory(dir: &Path) -> Result<Self> {
        let mut figures = BTreeMap::new();
        for entry in std::fs::read_dir(dir).map_err(file_system(dir, "read directory"))? {
            let path = entry.map_err(file_system(dir, "read directory"))?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(FIGURE_EXTENSION) {
                continue;
            }
            if let Some(key) = path.file_stem().and_then(|s| s.to_str()) {
                figures.insert(key.to_string(), path.clone());
            }
        }

        let dir_name = dir
            .file_name()
            .map_or_else(
                || dir.display().to_string(),
                |name| name.to_string_lossy().to_string(),
            );

        let (name, shape) = match read_optional(&dir.join(PROBLEM_DATA_FILE))? {
            Some(contents) => parse_problem_data(&contents, &dir_name)?,
            None => {
                let shape = if figures.contains_key("H") {
                    ProblemShape::ThreeByThree
                } else {
                    ProblemShape::TwoByTwo
                };
                (dir_name.clone(), shape)
            }
        };

        let expected_answer = match read_optional(&dir.join(PROBLEM_ANSWER_FILE))? {
            Some(contents) => Some(parse_answer(&contents, &name)?),
            None => None,
        };

        Ok(Self {
            name,
            shape,
            figures,
            expected_answer,
        })
    }

    /// Whether `dir` looks like a problem directory (has an `A` figure)
    pub fn is_problem_directory(dir: &Path) -> bool {
        dir.join(format!("A.{FIGURE_EXTENSION}")).is_file()
    }

    /// Problem name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Problem layout
    pub const fn shape(&self) -> ProblemShape {
        self.shape
    }

    /// Known correct answer, if provided
    pub const fn expected_answer(&self) -> Option<usize> {
        self.expected_answer
    }

    /// All registered figures by key
    pub const fn figures(&self) -> &BTreeMap<String, PathBuf> {
        &self.figures
    }

    /// Path of the figure with the given key
    ///
    /// # Errors
    ///
    /// Returns an error if the problem has no such figure
    pub fn figure(&self, key: &str) -> Result<&Path> {
        self.figures
            .get(key)
            .map(PathBuf::as_path)
            .ok_or_else(|| SolverError::MissingFigure {
                problem: self.name.clone(),
                figure: key.to_string(),
            })
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(file_system(path, "read file"))
}

fn parse_problem_data(contents: &str, fallback_name: &str) -> Result<(String, ProblemShape)> {
    let mut lines = contents.lines().map(str::trim);
    let name = lines
        .next()
        .filter(|line| !line.is_empty())
        .unwrap_or(fallback_name)
        .to_string();
    let tag = lines.next().unwrap_or_default();
    let shape = ProblemShape::parse(tag).ok_or_else(|| {
        invalid_problem(&name, &format!("unrecognized problem type '{tag}'"))
    })?;
    Ok((name, shape))
}

fn parse_answer(contents: &str, name: &str) -> Result<usize> {
    let trimmed = contents.trim();
    match trimmed.parse::<usize>() {
        Ok(answer) if answer > 0 => Ok(answer),
        _ => Err(invalid_problem(
            &name,
            &format!("expected answer '{trimmed}' is not a positive integer"),
        )),
    }
}
