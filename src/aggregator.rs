use serde::Serialize;
use tracing::debug;

use crate::error::RatingError;
use crate::rating_context::RatingContext;
use crate::tier_table::TierTable;
use crate::util::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBreakdown {
    pub total: i32,
    pub top_problem_component: i32,
    pub submission_component: i32,
    pub solved_component: i32,
    pub contribution_component: i32,
}

impl RatingBreakdown {
    pub fn tier_label(&self, user_tiers: &TierTable) -> Result<String, RatingError> {
        user_tiers.tier_label(self.total)
    }
}

fn check_count(field: &'static str, value: i64) -> Result<(), RatingError> {
    if value < 0 {
        return Err(RatingError::InvalidCountArgument { field, value });
    }
    Ok(())
}

/// Sum of the grade scores of `ratings`, each resolved through `grades`.
pub fn top_problem_score(ratings: &[i32], grades: &TierTable) -> Result<i32, RatingError> {
    let mut scores = Vec::with_capacity(ratings.len());
    for &r in ratings {
        scores.push(grades.lookup(r)?.score);
    }
    Ok(sum_scores(scores))
}

/// `top_problem_ratings` is summed as given; pre-limit it with
/// [`select_top_problem_ratings`].
pub fn compute_rating(
    top_problem_ratings: &[i32],
    submission_count: i64,
    solved_count: i64,
    contribution_count: i64,
    grades: &TierTable,
    ctx: &RatingContext,
) -> Result<RatingBreakdown, RatingError> {
    check_count("submission_count", submission_count)?;
    check_count("solved_count", solved_count)?;
    check_count("contribution_count", contribution_count)?;

    let top_problem_component = top_problem_score(top_problem_ratings, grades)?;
    let submission_component =
        capped_linear(submission_count, ctx.submission_weight, ctx.submission_cap);
    let solved_component = saturating_score(ctx.solved_asymptote, ctx.solved_decay, solved_count);
    let contribution_component =
        saturating_score(ctx.contribution_asymptote, ctx.contribution_decay, contribution_count);

    let total = sum_scores([
        top_problem_component,
        submission_component,
        solved_component,
        contribution_component,
    ]);

    debug!(
        total,
        top_problem_component,
        submission_component,
        solved_component,
        contribution_component,
        "computed rating"
    );

    Ok(RatingBreakdown {
        total,
        top_problem_component,
        submission_component,
        solved_component,
        contribution_component,
    })
}

/// Highest `limit` ratings, descending.
pub fn select_top_problem_ratings(ratings: &[i32], limit: usize) -> Vec<i32> {
    let mut sorted = ratings.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(limit);
    sorted
}
