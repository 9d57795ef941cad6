//! Solver constants and runtime configuration defaults

// Acceptance thresholds
/// Minimum fuzzy match score for a predicted solution to be trusted
pub const MATCHED_IMAGE_THRESHOLD: f64 = 0.9;

/// Deviation gap the best progression answer must lead the runner-up by
pub const DEVIATION_DIFFERENCE_REQUIRED: u32 = 2;

// Pixel comparison settings
/// Chebyshev radius within which a black pixel counts as matched when fuzzy
pub const FUZZY_RADIUS: usize = 2;

/// Luma values strictly below this are treated as black
pub const BLACK_LUMA_THRESHOLD: u8 = 128;

// Degenerate range widths are replaced with these before division
/// Minimum expected-range width for pixel change differences
pub const MIN_PIXEL_RANGE_WIDTH: i64 = 1;
/// Minimum expected-range width for match rate differences
pub const MIN_MATCH_RATE_RANGE_WIDTH: f64 = 0.1;

// Problem description files
/// Optional file holding the problem name and shape
pub const PROBLEM_DATA_FILE: &str = "ProblemData.txt";
/// Optional file holding the expected answer
pub const PROBLEM_ANSWER_FILE: &str = "ProblemAnswer.txt";
/// Extension of figure images
pub const FIGURE_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Diagnostic export settings
/// Delay between frames of the exported prediction GIF
pub const PREDICTION_FRAME_DELAY_MS: u32 = 500;

/// Runtime values handed to the search, matcher and orchestrator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Fuzzy match score below which the matcher abstains
    pub matched_image_threshold: f64,
    /// Deviation gap required to accept a progression answer
    pub deviation_difference_required: u32,
    /// Radius used by fuzzy image comparison
    pub fuzzy_radius: usize,
    /// Minimum pixel change range width
    pub min_pixel_range_width: i64,
    /// Minimum match rate range width
    pub min_match_rate_range_width: f64,
    /// Whether 3x3 puzzles fall back to transform search when progression is unsure
    pub search_fallback: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            matched_image_threshold: MATCHED_IMAGE_THRESHOLD,
            deviation_difference_required: DEVIATION_DIFFERENCE_REQUIRED,
            fuzzy_radius: FUZZY_RADIUS,
            min_pixel_range_width: MIN_PIXEL_RANGE_WIDTH,
            min_match_rate_range_width: MIN_MATCH_RATE_RANGE_WIDTH,
            search_fallback: true,
        }
    }
}

impl SolverConfig {
    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The match threshold lies outside `[0, 1]`
    /// - Either minimum range width is not strictly positive
    pub fn validate(&self) -> crate::io::error::Result<()> {
        use crate::io::error::invalid_parameter;

        if !(0.0..=1.0).contains(&self.matched_image_threshold) {
            return Err(invalid_parameter(
                "matched_image_threshold",
                &self.matched_image_threshold,
                &"must lie between 0 and 1",
            ));
        }
        if self.min_pixel_range_width <= 0 {
            return Err(invalid_parameter(
                "min_pixel_range_width",
                &self.min_pixel_range_width,
                &"must be positive",
            ));
        }
        if self.min_match_rate_range_width.is_nan() || self.min_match_rate_range_width <= 0.0 {
            return Err(invalid_parameter(
                "min_match_rate_range_width",
                &self.min_match_rate_range_width,
                &"must be positive",
            ));
        }
        Ok(())
    }
}
