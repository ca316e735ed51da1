//! Tests for argument parsing and the generation runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pathgrid::GenerationError;
    use pathgrid::algorithm::GenerationRequest;
    use pathgrid::io::cli::{Cli, GenerationRunner};
    use pathgrid::io::encoding::PuzzleEncoding;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pathgrid").chain(args.iter().copied()))
    }

    fn run(args: &[&str]) -> pathgrid::Result<String> {
        let cli = parse(args).map_err(|error| GenerationError::InvalidParameter {
            parameter: "args",
            value: args.join(" "),
            reason: error.to_string(),
        })?;
        let mut out = Vec::new();
        GenerationRunner::new(cli).run(&mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    // Tests defaults reproduce the preset request and session budgets
    // Verified by defaulting the timeout to the oracle timeout
    #[test]
    fn test_defaults() -> Result<(), clap::Error> {
        let cli = parse(&[])?;

        assert_eq!(cli.request(), GenerationRequest::default());
        assert_eq!(cli.controller_config().timeout, Duration::from_secs(600));
        assert_eq!(cli.controller_config().oracle_timeout, Duration::from_secs(60));
        assert!(cli.seed.is_none());
        assert!(cli.should_show_progress());
        Ok(())
    }

    // Tests counts, budgets and repeated oracle arguments are parsed
    // Verified by keeping only the last oracle argument
    #[test]
    fn test_parse_counts_and_oracle() -> Result<(), clap::Error> {
        let cli = parse(&[
            "-w", "6", "-H", "4", "-o", "2", "-r", "3", "-S", "1", "-u", "2", "-c", "0", "-C",
            "2", "--seed", "9", "-t", "5", "-m", "10", "--oracle", "solver", "--oracle-arg",
            "--fast", "--oracle-arg", "x", "-q",
        ])?;

        assert_eq!(
            cli.request(),
            GenerationRequest {
                width: 6,
                height: 4,
                obstacles: 2,
                required: 3,
                squares: 1,
                suns: 2,
                cancellations: 0,
                colors: 2,
            }
        );
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.controller_config().timeout, Duration::from_secs(5));
        assert_eq!(cli.controller_config().max_attempts, Some(10));
        assert_eq!(cli.oracle_args, vec!["--fast".to_string(), "x".to_string()]);
        assert!(!cli.should_show_progress());
        Ok(())
    }

    // Tests a seeded run prints a decodable puzzle with the requested counts
    // Verified by printing the census instead of the request
    #[test]
    fn test_run_prints_puzzle_json() -> pathgrid::Result<()> {
        let output = run(&["--seed", "3", "-q"])?;
        let encoding = PuzzleEncoding::from_json(&output)?;
        let puzzle = encoding.to_puzzle()?;

        assert_eq!(encoding.request(), GenerationRequest::default());
        assert_eq!(puzzle.census().cancellations, 4);
        assert_eq!(run(&["--seed", "3", "-q"])?, output);
        Ok(())
    }

    // Tests the output flag writes the file and reports where it went
    // Verified by writing to stdout regardless of the flag
    #[test]
    fn test_run_writes_output_file() -> pathgrid::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("puzzle.json");
        let path_arg = path.to_string_lossy().into_owned();

        let output = run(&["--seed", "1", "-q", "-O", &path_arg])?;

        assert!(output.starts_with("Accepted puzzle written to"));
        let encoding = PuzzleEncoding::from_json(&std::fs::read_to_string(&path)?)?;
        assert_eq!(encoding.grid_width, 5);
        Ok(())
    }

    // Tests the limits flag prints the selector ranges without generating
    // Verified by generating before printing limits
    #[test]
    fn test_limits() -> pathgrid::Result<()> {
        let output = run(&["--limits", "-w", "5", "-H", "5"])?;

        assert!(output.starts_with("Grid 5x5"));
        assert!(output.contains("obstacles:     0..=32"));
        assert!(output.contains("required:      0..=47"));
        assert!(output.contains("colors:        2..=8"));
        Ok(())
    }

    // Tests infeasible counts fail with validation errors
    // Verified by returning the fallback puzzle instead
    #[test]
    fn test_infeasible_counts_fail() {
        let result = run(&["-w", "3", "-H", "3", "-S", "5", "-u", "0", "-c", "0", "-q"]);

        assert!(matches!(result, Err(GenerationError::Validation { .. })));
    }
}
