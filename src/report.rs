use serde::Serialize;

use crate::engine::{ProblemResult, UserResult};

#[derive(Serialize)]
struct JsonReport<'a> {
    problems: &'a [ProblemResult],
    users: &'a [UserResult],
}

pub fn format_problem_row(p: &ProblemResult) -> String {
    format!("| {0:12} | {1:5} | {2:3} | {3:10} |", p.id, p.votes, p.tier, p.label)
}

pub fn format_user_row(rank: usize, u: &UserResult) -> String {
    let categories: Vec<String> =
        u.categories.iter().map(|c| format!("{} {}", c.category, c.rating)).collect();

    format!("|{0:3}. | {1:16} | {2:5} | {3:9} | {4:4} {5:3} {6:4} {7:3} | {8}",
        rank,
        u.handle,
        u.rating.total,
        u.tier,
        u.rating.top_problem_component,
        u.rating.submission_component,
        u.rating.solved_component,
        u.rating.contribution_component,
        categories.join(", "),
    )
}

pub fn output_report(problems: &[ProblemResult], users: &[UserResult]) {
    if !problems.is_empty() {
        println!("Problems");
        for p in problems {
            println!("{}", format_problem_row(p));
        }
    }

    // Users are printed best first
    let mut ranked: Vec<&UserResult> = users.iter().collect();
    ranked.sort_by(|a, b| b.rating.total.cmp(&a.rating.total));

    if !ranked.is_empty() {
        println!("Users");
        for (i, u) in ranked.into_iter().enumerate() {
            println!("{}", format_user_row(i + 1, u));
        }
    }
}

pub fn output_json(problems: &[ProblemResult], users: &[UserResult]) -> serde_json::Result<()> {
    let doc = JsonReport { problems, users };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::RatingBreakdown;
    use crate::category::CategoryRating;

    #[test]
    fn user_row_lists_components_and_categories() {
        let user = UserResult {
            handle: "sam".to_string(),
            rating: RatingBreakdown {
                total: 560,
                top_problem_component: 40,
                submission_component: 500,
                solved_component: 20,
                contribution_component: 0,
            },
            tier: "Silver2".to_string(),
            categories: vec![CategoryRating { category: "Crimp".to_string(), rating: 72 }],
        };

        let row = format_user_row(1, &user);
        assert!(row.contains("sam"));
        assert!(row.contains("Silver2"));
        assert!(row.contains("Crimp 72"));
    }
}
