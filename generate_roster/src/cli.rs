use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "generate_roster",
    version,
    about = "Builds a monthly duty roster from a JSON request"
)]
pub struct Cli {
    /// Input request document (JSON).
    #[arg(long = "in", visible_alias = "input", value_name = "PATH")]
    pub input: PathBuf,

    /// Where the roster document is written (JSON).
    #[arg(long = "out", visible_alias = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Wall-clock budget for the solve, in seconds.
    #[arg(
        long = "time_limit",
        visible_alias = "time-limit",
        env = "SOLVER_TIME_LIMIT",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub time_limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_and_alias_flags() {
        let cli = Cli::try_parse_from([
            "generate_roster",
            "--in",
            "a.json",
            "--out",
            "b.json",
            "--time_limit",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.time_limit, 30);

        let cli = Cli::try_parse_from([
            "generate_roster",
            "--input",
            "a.json",
            "--output",
            "b.json",
        ])
        .unwrap();
        assert_eq!(cli.input, PathBuf::from("a.json"));
        assert_eq!(cli.time_limit, 60);
    }

    #[test]
    fn rejects_a_zero_time_limit() {
        let result = Cli::try_parse_from([
            "generate_roster",
            "--in",
            "a.json",
            "--out",
            "b.json",
            "--time_limit",
            "0",
        ]);
        assert!(result.is_err());
    }
}
