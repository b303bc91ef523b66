// Each vote weighs max(index decay, whole-day decay) relative to the last vote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use tracing::{debug, trace};

use crate::error::RatingError;
use crate::rating_context::RatingContext;
use crate::tier_table::{TierBucket, TierTable};
use crate::util::round_to_int;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(alias = "tierValue")]
    pub tier_value: i32,
    #[serde(alias = "castAt")]
    pub cast_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(tier_value: i32, cast_at: DateTime<Utc>) -> Self {
        Self { tier_value, cast_at }
    }
}

/// Weight of every vote, in input order.
pub fn vote_weights(votes: &[Vote], ctx: &RatingContext) -> Vec<f64> {
    let Some(last) = votes.last() else { return Vec::new() };
    let last_index = votes.len() - 1;

    votes
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let steps_back = i32::try_from(last_index - i).unwrap_or(i32::MAX);
            let mut days = (last.cast_at - v.cast_at).num_days();
            if days < 0 {
                debug!(index = i, days, "vote cast after the last vote; treating as same day");
                days = 0;
            }
            let days = i32::try_from(days).unwrap_or(i32::MAX);

            let index_weight = ctx.index_decay.powi(steps_back);
            let date_weight = ctx.date_decay.powi(days);
            f64::max(index_weight, date_weight)
        })
        .collect()
}

/// Votes must be in chronological order; they are never re-sorted here.
pub fn estimate_tier(votes: &[Vote], ctx: &RatingContext) -> Result<i32, RatingError> {
    if votes.is_empty() {
        return Err(RatingError::EmptyVoteSet);
    }

    let weights = vote_weights(votes, ctx);

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for (v, w) in votes.iter().zip(&weights) {
        weighted_sum += w * f64::from(v.tier_value);
        weight_total += w;
    }

    let tier = round_to_int(weighted_sum / weight_total);
    trace!(votes = votes.len(), weight_total, weighted_sum, "weighted vote mean");
    debug!(votes = votes.len(), tier, "estimated consensus tier");

    Ok(tier)
}

/// Estimates the tier and resolves it against the problem grade table.
pub fn estimate_problem_grade<'a>(
    votes: &[Vote],
    grades: &'a TierTable,
    ctx: &RatingContext,
) -> Result<&'a TierBucket, RatingError> {
    let tier = estimate_tier(votes, ctx)?;
    grades.lookup(tier)
}
