//! Tests for figure loading and diagnostic image export

#[cfg(test)]
mod tests {
    use ravensolve::SolverError;
    use ravensolve::imaging::BinaryImage;
    use ravensolve::io::image::{
        export_attempt, export_binary_png, export_predictions_gif, load_figure, load_puzzle,
    };
    use ravensolve::io::problem::{Problem, ProblemShape};

    fn tempdir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap_or_else(|err| unreachable!("tempdir: {err}"))
    }

    fn cross() -> BinaryImage {
        BinaryImage::from_ascii(&[".#.", "###", ".#."])
    }

    // Tests a saved figure loads back unchanged
    // Verified by inverting colors on export
    #[test]
    fn test_export_then_load_png() {
        let dir = tempdir();
        let path = dir.path().join("nested").join("cross.png");

        assert!(export_binary_png(&cross(), &path).is_ok());
        assert_eq!(load_figure(&path).ok(), Some(cross()));
    }

    // Tests loading a missing file reports the path
    // Verified by mapping to a generic file system error
    #[test]
    fn test_load_missing_figure() {
        let dir = tempdir();
        let path = dir.path().join("absent.png");

        match load_figure(&path) {
            Err(SolverError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => unreachable!("expected ImageLoad error, got {other:?}"),
        }
    }

    // Tests GIF export requires frames and writes a file
    // Verified by skipping the empty check
    #[test]
    fn test_export_predictions_gif() {
        let dir = tempdir();
        let path = dir.path().join("predictions.gif");

        assert!(matches!(
            export_predictions_gif(&[], &path, 100),
            Err(SolverError::InvalidParameter { .. })
        ));
        assert!(export_predictions_gif(&[cross(), BinaryImage::blank(3, 3)], &path, 100).is_ok());
        assert!(path.is_file());
    }

    // Tests attempt export writes every artifact
    // Verified by skipping the GIF
    #[test]
    fn test_export_attempt() {
        let dir = tempdir();
        let predictions = vec![cross(), BinaryImage::blank(3, 3)];

        assert!(export_attempt(dir.path(), &cross(), &predictions).is_ok());
        assert!(dir.path().join("start.png").is_file());
        assert!(dir.path().join("solution_2.png").is_file());
        assert!(dir.path().join("predictions.gif").is_file());
    }

    // Tests puzzle loading resamples every figure to the first cell
    // Verified by normalizing grid and answers separately
    #[test]
    fn test_load_puzzle_normalizes() {
        let dir = tempdir();
        let mut problem = Problem::new("sizes", ProblemShape::TwoByTwo);
        for (index, key) in ["A", "B", "C", "1", "2", "3", "4", "5", "6"].iter().enumerate() {
            let size = if index % 2 == 0 { 6 } else { 3 };
            let path = dir.path().join(format!("{key}.png"));
            assert!(export_binary_png(&cross().resampled(size, size), &path).is_ok());
            problem = problem.with_figure(*key, path);
        }

        let puzzle = load_puzzle(&problem);
        assert!(puzzle.is_ok());
        if let Ok(puzzle) = puzzle {
            assert_eq!(puzzle.grid().len(), 3);
            assert_eq!(puzzle.answers().len(), 6);
            assert!(
                puzzle
                    .grid()
                    .iter()
                    .chain(puzzle.answers())
                    .all(|image| image.dimensions() == (6, 6))
            );
        }
    }

    // Tests puzzle loading fails on a missing answer
    // Verified by skipping missing figures
    #[test]
    fn test_load_puzzle_missing_answer() {
        let dir = tempdir();
        let mut problem = Problem::new("partial", ProblemShape::TwoByTwo);
        for key in ["A", "B", "C"] {
            let path = dir.path().join(format!("{key}.png"));
            assert!(export_binary_png(&cross(), &path).is_ok());
            problem = problem.with_figure(key, path);
        }

        assert!(matches!(
            load_puzzle(&problem),
            Err(SolverError::MissingFigure { .. })
        ));
    }
}
