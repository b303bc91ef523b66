use std::path::PathBuf;

use clap::Parser;

/// Rate problems and users from an input fixture.
///
/// Tier tables default to the built-in ones; pass CSV files to override them.
/// Log level comes from RUST_LOG (default warn).
#[derive(Debug, Parser)]
#[command(name = "climb-rating", version)]
pub struct Cli {
    /// Input fixture with problems and users.
    #[arg(default_value = "data/input_sample.json")]
    pub input: PathBuf,

    /// JSON file overriding rating constants.
    #[arg(long)]
    pub context: Option<PathBuf>,

    /// CSV user tier table (half-open ranges).
    #[arg(long)]
    pub user_tiers: Option<PathBuf>,

    /// CSV problem grade table (closed ranges).
    #[arg(long)]
    pub problem_grades: Option<PathBuf>,

    /// Print a JSON document instead of the console table.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_sample_input() {
        let cli = Cli::try_parse_from(["climb-rating"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("data/input_sample.json"));
        assert!(cli.context.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "climb-rating",
            "in.json",
            "--context",
            "ctx.json",
            "--user-tiers",
            "users.csv",
            "--problem-grades",
            "grades.csv",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("in.json"));
        assert_eq!(cli.context, Some(PathBuf::from("ctx.json")));
        assert_eq!(cli.user_tiers, Some(PathBuf::from("users.csv")));
        assert_eq!(cli.problem_grades, Some(PathBuf::from("grades.csv")));
        assert!(cli.json);
    }

    #[test]
    fn rejects_unknown_flag_and_missing_value() {
        assert!(Cli::try_parse_from(["climb-rating", "--verbose"]).is_err());
        assert!(Cli::try_parse_from(["climb-rating", "--context"]).is_err());
        assert!(Cli::try_parse_from(["climb-rating", "a.json", "b.json"]).is_err());
    }
}
