// Untouched tags score 0 but are still ranked. Ties go to the lower priority.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use tracing::debug;

use crate::error::RatingError;
use crate::rating_context::RatingContext;
use crate::tier_table::TierTable;
use crate::util::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Crimp,
    Sloper,
    Pinch,
    Pocket,
    Jug,
    Dyno,
    Balance,
    Overhang,
    Slab,
    Compression,
    HeelHook,
    Coordination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub display_name: &'static str,
    pub priority: u8,
}

// Indexed by `Tag as usize`.
static TAG_INFO: [TagInfo; 12] = [
    TagInfo { display_name: "Crimp", priority: 1 },
    TagInfo { display_name: "Sloper", priority: 3 },
    TagInfo { display_name: "Pinch", priority: 5 },
    TagInfo { display_name: "Pocket", priority: 9 },
    TagInfo { display_name: "Jug", priority: 11 },
    TagInfo { display_name: "Dyno", priority: 2 },
    TagInfo { display_name: "Balance", priority: 6 },
    TagInfo { display_name: "Overhang", priority: 4 },
    TagInfo { display_name: "Slab", priority: 7 },
    TagInfo { display_name: "Compression", priority: 8 },
    TagInfo { display_name: "Heel Hook", priority: 10 },
    TagInfo { display_name: "Coordination", priority: 12 },
];

impl Tag {
    pub const ALL: [Tag; 12] = [
        Tag::Crimp,
        Tag::Sloper,
        Tag::Pinch,
        Tag::Pocket,
        Tag::Jug,
        Tag::Dyno,
        Tag::Balance,
        Tag::Overhang,
        Tag::Slab,
        Tag::Compression,
        Tag::HeelHook,
        Tag::Coordination,
    ];

    pub fn info(self) -> &'static TagInfo {
        &TAG_INFO[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn priority(self) -> u8 {
        self.info().priority
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRatingPair {
    pub tag: Tag,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub rating: i32,
}

impl TagRatingPair {
    pub fn new(tag: Tag, rating: i32) -> Self {
        Self { tag, rating }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRating {
    pub category: String,
    pub rating: i32,
}

fn group_by_tag(pairs: &[TagRatingPair]) -> BTreeMap<Tag, Vec<i32>> {
    let mut grouped: BTreeMap<Tag, Vec<i32>> = BTreeMap::new();
    for p in pairs {
        grouped.entry(p.tag).or_default().push(p.rating);
    }
    grouped
}

fn tag_rating(
    solved: &[i32],
    attempted_count: usize,
    grades: &TierTable,
    ctx: &RatingContext,
) -> Result<i32, RatingError> {
    let mut best = solved.to_vec();
    best.sort_unstable_by(|a, b| b.cmp(a));
    best.truncate(ctx.top_problem_limit);

    let mut scores = Vec::with_capacity(best.len());
    for r in best {
        scores.push(grades.lookup(r)?.score);
    }
    let top_score = sum_scores(scores).saturating_mul(ctx.category_top_weight);

    let attempted = i64::try_from(attempted_count).unwrap_or(i64::MAX);
    let solved_count = i64::try_from(solved.len()).unwrap_or(i64::MAX);
    let all_submission_score = capped_linear(attempted, ctx.submission_weight, ctx.submission_cap);
    let solved_count_score = saturating_score(ctx.solved_asymptote, ctx.solved_decay, solved_count);

    Ok(sum_scores([top_score, all_submission_score, solved_count_score]))
}

/// Rates every tag and returns the best `ctx.category_limit` of them.
pub fn compute_category_ratings(
    solved_pairs: &[TagRatingPair],
    all_pairs: &[TagRatingPair],
    grades: &TierTable,
    ctx: &RatingContext,
) -> Result<Vec<CategoryRating>, RatingError> {
    let solved = group_by_tag(solved_pairs);
    let attempted = group_by_tag(all_pairs);

    let mut rated: Vec<(Tag, i32)> = Vec::with_capacity(Tag::ALL.len());
    for tag in Tag::ALL {
        let solved_ratings = solved.get(&tag).map_or(&[][..], Vec::as_slice);
        let attempted_count = attempted.get(&tag).map_or(0, Vec::len);
        rated.push((tag, tag_rating(solved_ratings, attempted_count, grades, ctx)?));
    }

    rated.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.priority().cmp(&b.0.priority())));
    rated.truncate(ctx.category_limit);

    debug!(
        solved = solved_pairs.len(),
        attempted = all_pairs.len(),
        kept = rated.len(),
        "ranked categories"
    );

    Ok(rated
        .into_iter()
        .map(|(tag, rating)| CategoryRating { category: tag.display_name().to_string(), rating })
        .collect())
}
