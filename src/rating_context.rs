use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// Asymptote of the contribution score. Every call site reads it from here.
pub const CONTRIBUTION_ASYMPTOTE: i32 = 100;

/// Tunable constants for tier estimation and rating aggregation.
///
/// A JSON file only needs to name the fields it overrides; everything else falls
/// back to `RatingContext::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingContext {
    pub index_decay: f64,           // Per position back in vote order
    pub date_decay: f64,            // Per whole day before the last vote

    pub submission_weight: i32,
    pub submission_cap: i64,

    pub solved_asymptote: i32,
    pub solved_decay: f64,

    pub contribution_asymptote: i32,
    pub contribution_decay: f64,

    pub top_problem_limit: usize,
    pub category_top_weight: i32,
    pub category_limit: usize,
}

impl Default for RatingContext {
    fn default() -> Self {
        Self {
            index_decay: 0.9,
            date_decay: 0.5,

            submission_weight: 10,
            submission_cap: 50,

            solved_asymptote: 1000,
            solved_decay: 0.98,

            contribution_asymptote: CONTRIBUTION_ASYMPTOTE,
            contribution_decay: 0.9,

            top_problem_limit: 50,
            category_top_weight: 2,
            category_limit: 8,
        }
    }
}

impl RatingContext {
    pub fn validate(&self) -> Result<(), RatingError> {
        for (name, base) in [
            ("index_decay", self.index_decay),
            ("date_decay", self.date_decay),
            ("solved_decay", self.solved_decay),
            ("contribution_decay", self.contribution_decay),
        ] {
            if !(base > 0.0 && base < 1.0) {
                return Err(RatingError::InvalidContext(format!(
                    "{name} must lie strictly between 0 and 1 (got {base})"
                )));
            }
        }

        for (name, value) in [
            ("submission_weight", i64::from(self.submission_weight)),
            ("submission_cap", self.submission_cap),
            ("solved_asymptote", i64::from(self.solved_asymptote)),
            ("contribution_asymptote", i64::from(self.contribution_asymptote)),
            ("category_top_weight", i64::from(self.category_top_weight)),
        ] {
            if value < 0 {
                return Err(RatingError::InvalidContext(format!(
                    "{name} must not be negative (got {value})"
                )));
            }
        }

        Ok(())
    }
}
