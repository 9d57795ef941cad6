//! Tests for argument parsing, outcome grading and result reporting

#[cfg(test)]
mod tests {
    use clap::Parser;
    use ravensolve::io::cli::{
        BatchSummary, Cli, Outcome, ProblemProcessor, ProblemRecord, write_results_csv,
    };
    use ravensolve::solver::Answer;
    use std::fs;

    // Tests flag parsing and conversion into solver settings
    // Verified by ignoring the threshold flag
    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "ravensolve",
            "problems",
            "--threshold",
            "0.75",
            "--no-fallback",
            "--quiet",
        ]);
        let config = cli.solver_config();

        assert!((config.matched_image_threshold - 0.75).abs() < f64::EPSILON);
        assert!(!config.search_fallback);
        assert!(!cli.should_show_progress());
        assert!(cli.dump.is_none());
    }

    // Tests default flags keep the fallback and show progress
    // Verified by inverting the fallback flag
    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ravensolve", "problems", "-r", "out/results.csv"]);

        assert!(cli.solver_config().search_fallback);
        assert!(cli.should_show_progress());
        assert_eq!(
            cli.results.as_deref(),
            Some(std::path::Path::new("out/results.csv"))
        );
    }

    // Tests grading against expected answers
    // Verified by grading abstentions as incorrect
    #[test]
    fn test_outcome_grading() {
        assert_eq!(Outcome::grade(Answer::Chosen(2), Some(2)), Outcome::Correct);
        assert_eq!(Outcome::grade(Answer::Chosen(3), Some(2)), Outcome::Incorrect);
        assert_eq!(Outcome::grade(Answer::Abstain, Some(2)), Outcome::Skipped);
        assert_eq!(Outcome::grade(Answer::Chosen(1), None), Outcome::Ungraded);
        assert_eq!(Outcome::Skipped.to_string(), "skipped");
    }

    // Tests summary tallies and display
    // Verified by counting skipped problems as incorrect
    #[test]
    fn test_batch_summary() {
        let mut summary = BatchSummary::default();
        summary.record(Outcome::Correct);
        summary.record(Outcome::Correct);
        summary.record(Outcome::Skipped);

        assert_eq!(summary.total(), 3);
        assert_eq!(summary.correct, 2);
        assert_eq!(
            summary.to_string(),
            "2 correct, 0 incorrect, 1 skipped, 0 ungraded"
        );
    }

    // Tests CSV rows quote awkward names and encode abstain as -1
    // Verified by writing the raw name
    #[test]
    fn test_csv_rows() {
        let record = ProblemRecord {
            name: "Problem, \"B\"".to_string(),
            answer: Answer::Abstain,
            expected: Some(4),
        };
        assert_eq!(record.csv_row(), "\"Problem, \"\"B\"\"\",-1,4,skipped");

        let record = ProblemRecord {
            name: "B-01".to_string(),
            answer: Answer::Chosen(2),
            expected: None,
        };
        assert_eq!(record.csv_row(), "B-01,2,,ungraded");
    }

    // Tests the results file gets a header and creates its directory
    // Verified by omitting the header row
    #[test]
    fn test_write_results_csv() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| unreachable!("tempdir: {err}"));
        let path = dir.path().join("reports").join("results.csv");
        let records = vec![ProblemRecord {
            name: "B-01".to_string(),
            answer: Answer::Chosen(2),
            expected: Some(2),
        }];

        assert!(write_results_csv(&path, &records).is_ok());
        let contents = fs::read_to_string(&path).unwrap_or_default();
        assert_eq!(contents, "problem,answer,expected,outcome\nB-01,2,2,correct\n");
    }

    // Tests a target that is not a directory is rejected
    // Verified by treating missing targets as empty batches
    #[test]
    fn test_invalid_target() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| unreachable!("tempdir: {err}"));
        let cli = Cli::parse_from([
            "ravensolve".into(),
            dir.path().join("missing").into_os_string(),
            "--quiet".into(),
        ]);

        assert!(ProblemProcessor::new(cli).process().is_err());
    }

    // Tests an out-of-range threshold is rejected before solving
    // Verified by skipping validation
    #[test]
    fn test_invalid_threshold() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| unreachable!("tempdir: {err}"));
        let cli = Cli::parse_from([
            "ravensolve".into(),
            dir.path().as_os_str().to_owned(),
            "--quiet".into(),
            "--threshold".into(),
            "2".into(),
        ]);

        assert!(ProblemProcessor::new(cli).process().is_err());
    }

    // Tests an empty directory yields an empty summary
    // Verified by failing on empty batches
    #[test]
    fn test_empty_batch() {
        let dir = tempfile::tempdir().unwrap_or_else(|err| unreachable!("tempdir: {err}"));
        let cli = Cli::parse_from([
            "ravensolve".into(),
            dir.path().as_os_str().to_owned(),
            "--quiet".into(),
        ]);

        let summary = ProblemProcessor::new(cli).process();
        assert_eq!(summary.ok().map(|s| s.total()), Some(0));
    }
}
