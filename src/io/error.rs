//! Error types for problem loading, figure decoding and diagnostic export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all solver operations
///
/// Only unavailable or malformed input surfaces here. A puzzle for which no
/// confident answer exists is not an error; the solver abstains instead.
#[derive(Debug)]
pub enum SolverError {
    /// Failed to load a figure image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A figure the puzzle shape requires is not part of the problem
    MissingFigure {
        /// Name of the problem being solved
        problem: String,
        /// Figure key that could not be resolved (`"A"`, `"3"`, ...)
        figure: String,
    },

    /// Problem description is malformed or incomplete
    InvalidProblem {
        /// Directory or name identifying the problem
        problem: String,
        /// Description of what's wrong with the problem
        reason: String,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a diagnostic image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load figure '{}': {source}", path.display())
            }
            Self::MissingFigure { problem, figure } => {
                write!(f, "Problem '{problem}' has no figure '{figure}'")
            }
            Self::InvalidProblem { problem, reason } => {
                write!(f, "Invalid problem '{problem}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

impl From<image::ImageError> for SolverError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid problem error
pub fn invalid_problem(problem: &impl ToString, reason: &impl ToString) -> SolverError {
    SolverError::InvalidProblem {
        problem: problem.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to a raw I/O error
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> SolverError {
    let path = path.into();
    move |source| SolverError::FileSystem {
        path,
        operation,
        source,
    }
}
