//! Fuzzy matching of predicted solutions against the multiple-choice answers

use crate::imaging::BinaryImage;
use crate::imaging::compare::match_score;
use crate::io::configuration::SolverConfig;
use std::fmt;

/// A chosen answer and how well a prediction matched it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solution {
    /// 1-based index of the answer figure
    pub answer: usize,
    /// Fuzzy match score in `[0, 1]`
    pub percent_match: f64,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}%", self.answer, self.percent_match * 100.0)
    }
}

/// Picks the answer best matching any prediction, or abstains below a threshold
#[derive(Clone, Copy, Debug)]
pub struct AnswerMatcher {
    threshold: f64,
    fuzzy_radius: usize,
}

impl AnswerMatcher {
    /// Create a matcher with an acceptance threshold and fuzzy comparison radius
    pub const fn new(threshold: f64, fuzzy_radius: usize) -> Self {
        Self {
            threshold,
            fuzzy_radius,
        }
    }

    /// Create a matcher from the solver configuration
    pub const fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.matched_image_threshold, config.fuzzy_radius)
    }

    /// Acceptance threshold in use
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// For each prediction, the answer it matches best (first answer on ties)
    pub fn best_per_prediction(
        &self,
        predictions: &[BinaryImage],
        answers: &[BinaryImage],
    ) -> Vec<Solution> {
        predictions
            .iter()
            .filter_map(|prediction| {
                answers
                    .iter()
                    .enumerate()
                    .map(|(index, answer)| Solution {
                        answer: index + 1,
                        percent_match: match_score(prediction, answer, Some(self.fuzzy_radius)),
                    })
                    .fold(None, keep_first_best)
            })
            .collect()
    }

    /// Choose the single best prediction/answer pair, or `None` to abstain
    ///
    /// Predictions are expected best-hypothesis first; on equal scores the
    /// earlier prediction wins.
    pub fn find_matching_answer(
        &self,
        predictions: &[BinaryImage],
        answers: &[BinaryImage],
    ) -> Option<Solution> {
        let chosen = self
            .best_per_prediction(predictions, answers)
            .into_iter()
            .fold(None, keep_first_best)?;

        if chosen.percent_match < self.threshold {
            tracing::debug!(%chosen, threshold = self.threshold, "no decent match");
            return None;
        }

        tracing::debug!(%chosen, "matched answer");
        Some(chosen)
    }
}

fn keep_first_best(best: Option<Solution>, next: Solution) -> Option<Solution> {
    match best {
        Some(current) if current.percent_match >= next.percent_match => Some(current),
        _ => Some(next),
    }
}
