// Tables are never mutated. To reload, build a new engine and swap it in whole.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::aggregator::*;
use crate::category::*;
use crate::data_loader::{ProblemInput, UserInput};
use crate::error::RatingError;
use crate::estimator::{estimate_tier, Vote};
use crate::rating_context::RatingContext;
use crate::tier_table::TierTable;

#[derive(Debug, Clone)]
pub struct RatingEngine {
    user_tiers: Arc<TierTable>,
    problem_grades: Arc<TierTable>,
    context: RatingContext,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemResult {
    pub id: String,
    pub votes: usize,
    pub tier: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResult {
    pub handle: String,
    pub rating: RatingBreakdown,
    pub tier: String,
    pub categories: Vec<CategoryRating>,
}

impl RatingEngine {
    pub fn new(
        user_tiers: TierTable,
        problem_grades: TierTable,
        context: RatingContext,
    ) -> Result<Self, RatingError> {
        context.validate()?;
        info!(
            user_buckets = user_tiers.buckets().len(),
            grade_buckets = problem_grades.buckets().len(),
            "rating engine ready"
        );

        Ok(Self {
            user_tiers: Arc::new(user_tiers),
            problem_grades: Arc::new(problem_grades),
            context,
        })
    }

    /// Engine over the built-in tables and default constants.
    pub fn with_defaults() -> Result<Self, RatingError> {
        Self::new(TierTable::user_tiers()?, TierTable::problem_grades()?, RatingContext::default())
    }

    pub fn user_tiers(&self) -> &TierTable {
        &self.user_tiers
    }

    pub fn problem_grades(&self) -> &TierTable {
        &self.problem_grades
    }

    pub fn context(&self) -> &RatingContext {
        &self.context
    }

    pub fn estimate_tier(&self, votes: &[Vote]) -> Result<i32, RatingError> {
        estimate_tier(votes, &self.context)
    }

    pub fn compute_rating(
        &self,
        top_problem_ratings: &[i32],
        submission_count: i64,
        solved_count: i64,
        contribution_count: i64,
    ) -> Result<RatingBreakdown, RatingError> {
        compute_rating(
            top_problem_ratings,
            submission_count,
            solved_count,
            contribution_count,
            &self.problem_grades,
            &self.context,
        )
    }

    pub fn compute_category_ratings(
        &self,
        solved_pairs: &[TagRatingPair],
        all_pairs: &[TagRatingPair],
    ) -> Result<Vec<CategoryRating>, RatingError> {
        compute_category_ratings(solved_pairs, all_pairs, &self.problem_grades, &self.context)
    }

    pub fn rate_problem(&self, problem: &ProblemInput) -> Result<ProblemResult, RatingError> {
        let tier = self.estimate_tier(&problem.votes)?;
        let label = self.problem_grades.tier_label(tier)?;

        Ok(ProblemResult {
            id: problem.id.clone(),
            votes: problem.votes.len(),
            tier,
            label,
        })
    }

    /// Limits the user's solved ratings to the configured top count before aggregating.
    pub fn rate_user(&self, user: &UserInput) -> Result<UserResult, RatingError> {
        let top =
            select_top_problem_ratings(&user.top_problem_ratings, self.context.top_problem_limit);
        let rating = self.compute_rating(
            &top,
            user.submission_count,
            user.solved_count,
            user.contribution_count,
        )?;
        let categories = self.compute_category_ratings(&user.solved_tags, &user.attempted_tags)?;

        Ok(UserResult {
            handle: user.handle.clone(),
            tier: rating.tier_label(&self.user_tiers)?,
            rating,
            categories,
        })
    }
}
