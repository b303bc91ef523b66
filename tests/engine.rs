use std::path::PathBuf;

use climb_rating::data_loader::*;
use climb_rating::rating_context::RatingContext;
use climb_rating::tier_table::{BoundaryConvention, TierTable};
use climb_rating::{RatingEngine, RatingError};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn shipped_csv_tables_match_builtins() {
    let users = load_tier_table(&data("user_tiers.csv"), BoundaryConvention::HalfOpen).unwrap();
    assert_eq!(users, TierTable::user_tiers().unwrap());

    let grades = load_tier_table(&data("problem_grades.csv"), BoundaryConvention::Closed).unwrap();
    assert_eq!(grades, TierTable::problem_grades().unwrap());
}

#[test]
fn shipped_context_is_default() {
    assert_eq!(load_context(&data("rating_context.json")).unwrap(), RatingContext::default());
}

#[test]
fn rates_sample_input() {
    let engine = RatingEngine::with_defaults().unwrap();
    let input = load_input(&data("input_sample.json")).unwrap();

    let first = engine.rate_problem(&input.problems[0]).unwrap();
    assert_eq!(first.id, "1001");
    assert_eq!(first.tier, 6);
    assert_eq!(first.label, "Silver5");

    assert_eq!(engine.rate_problem(&input.problems[2]), Err(RatingError::EmptyVoteSet));

    let newcomer = engine.rate_user(&input.users[1]).unwrap();
    assert_eq!(newcomer.rating.total, 30);
    assert_eq!(newcomer.tier, "Bronze5");
    assert_eq!(newcomer.categories.len(), 8);
    assert!(newcomer.categories.iter().all(|c| c.rating == 0));

    let sam = engine.rate_user(&input.users[0]).unwrap();
    assert_eq!(sam.rating.submission_component, 500);
    assert_eq!(sam.categories[0].category, "Sloper");
}

#[test]
fn engine_rejects_invalid_context() {
    let ctx = RatingContext { solved_decay: 0.0, ..RatingContext::default() };
    let users = TierTable::user_tiers().unwrap();
    let grades = TierTable::problem_grades().unwrap();
    let err = RatingEngine::new(users, grades, ctx).unwrap_err();
    assert!(matches!(err, RatingError::InvalidContext(_)));
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = std::sync::Arc::new(RatingEngine::with_defaults().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.compute_rating(&[i * 5], 10, 10, 10).unwrap().total)
        })
        .collect();

    let totals: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(totals.windows(2).all(|w| w[0] < w[1]));
}
