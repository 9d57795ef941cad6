//! Progression analysis for 3x3 puzzles
//!
//! Each complete row (or column) is summarised by how its step-to-step pixel
//! change and match rate evolve. Two complete lines are extrapolated to an
//! expected range for the third, and every candidate answer is penalised by
//! how far its own completed line falls outside that range.

use crate::imaging::BinaryImage;
use crate::imaging::compare::{match_rate, pixel_count_delta};
use crate::io::configuration::SolverConfig;
use crate::solver::orchestrator::Axis;
use num_traits::{Num, ToPrimitive};
use std::fmt;

/// Inclusive `[min, max]` range of plausible values for a metric
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpectedRange<T> {
    min: T,
    max: T,
}

impl<T> ExpectedRange<T>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    /// Range spanning two bounds given in any order
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Smallest range containing all three values
    pub fn spanning(values: [T; 3]) -> Self {
        let [a, b, c] = values;
        let low = |x: T, y: T| if y < x { y } else { x };
        let high = |x: T, y: T| if y > x { y } else { x };
        Self {
            min: low(low(a, b), c),
            max: high(high(a, b), c),
        }
    }

    /// Lower bound
    pub const fn min(&self) -> T {
        self.min
    }

    /// Upper bound
    pub const fn max(&self) -> T {
        self.max
    }

    /// Distance between the bounds
    pub fn width(&self) -> T {
        self.max - self.min
    }

    /// Whether `value` lies within the bounds
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of range widths `value` lies outside the range, rounded up
    ///
    /// A zero-width range is widened to `min_width` first.
    pub fn penalty(&self, value: T, min_width: T) -> u32 {
        let outside = if value > self.max {
            value - self.max
        } else if value < self.min {
            self.min - value
        } else {
            return 0;
        };

        let width = if self.width() == T::zero() {
            min_width
        } else {
            self.width()
        };

        let outside = outside.to_f64().unwrap_or(f64::INFINITY);
        let width = width.to_f64().unwrap_or(1.0);
        (outside / width).ceil() as u32
    }
}

impl<T: fmt::Display> fmt::Display for ExpectedRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Change statistics along one line of three figures
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelAnalysis {
    pixel_changes: [i64; 2],
    pixel_change_dif: i64,
    match_rates: [f64; 2],
    match_rate_dif: f64,
}

impl PixelAnalysis {
    /// Measure the two steps between three consecutive figures
    pub fn new(images: [&BinaryImage; 3]) -> Self {
        let [first, second, third] = images;
        Self::from_steps(
            [
                pixel_count_delta(first, second),
                pixel_count_delta(second, third),
            ],
            [match_rate(first, second), match_rate(second, third)],
        )
    }

    /// Build from already measured per-step values
    ///
    /// The pixel change difference is the second step minus the first; the
    /// match rate difference is the first step minus the second.
    pub fn from_steps(pixel_changes: [i64; 2], match_rates: [f64; 2]) -> Self {
        let [change_1, change_2] = pixel_changes;
        let [rate_1, rate_2] = match_rates;
        Self {
            pixel_changes,
            pixel_change_dif: change_2 - change_1,
            match_rates,
            match_rate_dif: rate_1 - rate_2,
        }
    }

    /// Black pixel change per step
    pub const fn pixel_changes(&self) -> [i64; 2] {
        self.pixel_changes
    }

    /// How the pixel change itself changes along the line
    pub const fn pixel_change_dif(&self) -> i64 {
        self.pixel_change_dif
    }

    /// Match rate per step
    pub const fn match_rates(&self) -> [f64; 2] {
        self.match_rates
    }

    /// How the match rate changes along the line
    pub const fn match_rate_dif(&self) -> f64 {
        self.match_rate_dif
    }

    /// Penalty for straying outside the extrapolated ranges (lower is better)
    pub fn deviation(&self, paa: &PixelAnalysisAnalysis, config: &SolverConfig) -> u32 {
        let pixel = paa
            .expected_pixel_dif_range()
            .penalty(self.pixel_change_dif, config.min_pixel_range_width);
        let rate = paa
            .expected_match_rate_dif_range()
            .penalty(self.match_rate_dif, config.min_match_rate_range_width);
        pixel.saturating_add(rate)
    }
}

impl fmt::Display for PixelAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel change dif {}, match rate dif {:.4}",
            self.pixel_change_dif, self.match_rate_dif
        )
    }
}

/// Extrapolation from two complete lines to the range expected of the third
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelAnalysisAnalysis {
    pixel_dif_change: i64,
    expected_pixel_dif: i64,
    expected_pixel_dif_range: ExpectedRange<i64>,
    match_rate_dif_change: f64,
    expected_match_rate_dif: f64,
    expected_match_rate_dif_range: ExpectedRange<f64>,
}

impl PixelAnalysisAnalysis {
    /// Continue the trend from `first` to `second` one more line
    pub fn new(first: &PixelAnalysis, second: &PixelAnalysis) -> Self {
        let pixel_dif_change = second.pixel_change_dif - first.pixel_change_dif;
        let expected_pixel_dif = second.pixel_change_dif + pixel_dif_change;

        let match_rate_dif_change = second.match_rate_dif - first.match_rate_dif;
        let expected_match_rate_dif = second.match_rate_dif + match_rate_dif_change;

        Self {
            pixel_dif_change,
            expected_pixel_dif,
            expected_pixel_dif_range: ExpectedRange::spanning([
                first.pixel_change_dif,
                second.pixel_change_dif,
                expected_pixel_dif,
            ]),
            match_rate_dif_change,
            expected_match_rate_dif,
            expected_match_rate_dif_range: ExpectedRange::spanning([
                first.match_rate_dif,
                second.match_rate_dif,
                expected_match_rate_dif,
            ]),
        }
    }

    /// Change in pixel change difference between the two lines
    pub const fn pixel_dif_change(&self) -> i64 {
        self.pixel_dif_change
    }

    /// Extrapolated pixel change difference of the third line
    pub const fn expected_pixel_dif(&self) -> i64 {
        self.expected_pixel_dif
    }

    /// Plausible pixel change differences for the third line
    pub const fn expected_pixel_dif_range(&self) -> ExpectedRange<i64> {
        self.expected_pixel_dif_range
    }

    /// Change in match rate difference between the two lines
    pub const fn match_rate_dif_change(&self) -> f64 {
        self.match_rate_dif_change
    }

    /// Extrapolated match rate difference of the third line
    pub const fn expected_match_rate_dif(&self) -> f64 {
        self.expected_match_rate_dif
    }

    /// Plausible match rate differences for the third line
    pub const fn expected_match_rate_dif_range(&self) -> ExpectedRange<f64> {
        self.expected_match_rate_dif_range
    }
}

impl fmt::Display for PixelAnalysisAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pixel dif range {}, match rate dif range [{:.4}, {:.4}]",
            self.expected_pixel_dif_range,
            self.expected_match_rate_dif_range.min(),
            self.expected_match_rate_dif_range.max()
        )
    }
}

/// A candidate answer scored against an extrapolated line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankedAnswer {
    /// 1-based index of the answer figure
    pub answer: usize,
    /// Total penalty across both metrics
    pub deviation: u32,
    /// Statistics of the line completed by this answer
    pub analysis: PixelAnalysis,
}

/// Outcome of the progression analysis along one axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisVerdict {
    /// Axis the lines run along
    pub axis: Axis,
    /// Lowest-deviation answer
    pub best: RankedAnswer,
    /// Deviation of the runner-up minus that of the best (0 without a runner-up)
    pub gap: u32,
}

/// Score every answer as the completion of `partial` and rank them by deviation
///
/// Equal deviations keep answer order.
pub fn rank_answers(
    paa: &PixelAnalysisAnalysis,
    partial: [&BinaryImage; 2],
    answers: &[BinaryImage],
    config: &SolverConfig,
) -> Vec<RankedAnswer> {
    let [first, second] = partial;
    let mut ranked: Vec<RankedAnswer> = answers
        .iter()
        .enumerate()
        .map(|(index, answer)| {
            let analysis = PixelAnalysis::new([first, second, answer]);
            RankedAnswer {
                answer: index + 1,
                deviation: analysis.deviation(paa, config),
                analysis,
            }
        })
        .collect();

    ranked.sort_by_key(|ranked_answer| ranked_answer.deviation);
    ranked
}

/// Run the progression analysis along one axis
///
/// `lines` are the two complete lines and `partial` the known figures of the
/// incomplete one. Returns `None` when there are no answers to rank.
pub fn evaluate_axis(
    axis: Axis,
    lines: [[&BinaryImage; 3]; 2],
    partial: [&BinaryImage; 2],
    answers: &[BinaryImage],
    config: &SolverConfig,
) -> Option<AxisVerdict> {
    let [first_line, second_line] = lines;
    let paa = PixelAnalysisAnalysis::new(
        &PixelAnalysis::new(first_line),
        &PixelAnalysis::new(second_line),
    );
    tracing::debug!(%axis, %paa, "extrapolated expected ranges");

    let ranked = rank_answers(&paa, partial, answers, config);
    let best = *ranked.first()?;
    let gap = ranked
        .get(1)
        .map_or(0, |runner_up| runner_up.deviation - best.deviation);

    tracing::debug!(
        %axis,
        answer = best.answer,
        deviation = best.deviation,
        gap,
        "best progression answer"
    );

    Some(AxisVerdict { axis, best, gap })
}

/// Prefer the axis whose best answer leads by more, accepting it only with enough lead
///
/// Equal gaps go to the vertical axis.
pub fn choose_verdict(
    horizontal: AxisVerdict,
    vertical: AxisVerdict,
    required_gap: u32,
) -> Option<AxisVerdict> {
    let chosen = if horizontal.gap > vertical.gap {
        horizontal
    } else {
        vertical
    };
    (chosen.gap >= required_gap).then_some(chosen)
}

/// Progression analysis over a 3x3 grid of figures `A..=H`
///
/// Rows `(A, B, C)` and `(D, E, F)` predict the completion of `(G, H, ?)`;
/// columns `(A, D, G)` and `(B, E, H)` predict `(C, F, ?)`.
pub fn progression_answer(
    grid: &[BinaryImage; 8],
    answers: &[BinaryImage],
    config: &SolverConfig,
) -> Option<AxisVerdict> {
    let [a, b, c, d, e, f, g, h] = grid;

    let horizontal = evaluate_axis(
        Axis::Horizontal,
        [[a, b, c], [d, e, f]],
        [g, h],
        answers,
        config,
    )?;
    let vertical = evaluate_axis(
        Axis::Vertical,
        [[a, d, g], [b, e, h]],
        [c, f],
        answers,
        config,
    )?;

    choose_verdict(horizontal, vertical, config.deviation_difference_required)
}
