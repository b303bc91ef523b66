use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{deserialize_number_from_string, deserialize_string_from_number};
use tracing::info;

use crate::category::TagRatingPair;
use crate::error::LoadError;
use crate::estimator::Vote;
use crate::rating_context::RatingContext;
use crate::tier_table::{BoundaryConvention, TierBucket, TierTable};

// Input fixture as handed over by the statistics and voting services.
// Votes must already be in chronological order per problem.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct InputData {
    #[serde(default)]
    pub problems: Vec<ProblemInput>,
    #[serde(default)]
    pub users: Vec<UserInput>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProblemInput {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    #[serde(alias = "problemId")]
    pub id: String,
    pub votes: Vec<Vote>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserInput {
    pub handle: String,
    #[serde(rename(deserialize = "topProblemRatings"), default)]
    pub top_problem_ratings: Vec<i32>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename(deserialize = "submissionCount"))]
    pub submission_count: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename(deserialize = "solvedCount"))]
    pub solved_count: i64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    #[serde(rename(deserialize = "contributionCount"))]
    pub contribution_count: i64,
    #[serde(rename(deserialize = "solvedTags"), default)]
    pub solved_tags: Vec<TagRatingPair>,
    #[serde(rename(deserialize = "attemptedTags"), default)]
    pub attempted_tags: Vec<TagRatingPair>,
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_input(path: &Path) -> Result<InputData, LoadError> {
    let data = read_file(path)?;
    let input: InputData = serde_json::from_str(&data)?;
    info!(
        problems = input.problems.len(),
        users = input.users.len(),
        path = %path.display(),
        "loaded input"
    );
    Ok(input)
}

// Fields the JSON leaves out keep their defaults.
pub fn read_context<R: Read>(reader: R) -> Result<RatingContext, LoadError> {
    let ctx: RatingContext = serde_json::from_reader(reader)?;
    ctx.validate()?;
    Ok(ctx)
}

pub fn load_context(path: &Path) -> Result<RatingContext, LoadError> {
    let data = read_file(path)?;
    read_context(data.as_bytes())
}

// CSV columns: name,level,min_rating,max_rating,score. An empty level means none.
// Rows must already be in ascending order.
pub fn read_tier_table<R: Read>(
    reader: R,
    convention: BoundaryConvention,
) -> Result<TierTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut buckets = Vec::new();
    for row in rdr.deserialize() {
        let bucket: TierBucket = row?;
        buckets.push(bucket);
    }

    Ok(TierTable::new(buckets, convention)?)
}

pub fn load_tier_table(
    path: &Path,
    convention: BoundaryConvention,
) -> Result<TierTable, LoadError> {
    let file = fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let table = read_tier_table(file, convention)?;
    info!(buckets = table.buckets().len(), path = %path.display(), "loaded tier table");
    Ok(table)
}
