//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use ravensolve::SolverError;
    use ravensolve::io::error::{invalid_parameter, invalid_problem};
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = SolverError::FileSystem {
            path: "/tmp/problem".into(),
            operation: "read directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read directory"));
    }

    // Tests MissingFigure names both problem and figure
    // Verified by omitting the figure key from the message
    #[test]
    fn test_missing_figure_error() {
        let error = SolverError::MissingFigure {
            problem: "Basic Problem B-04".to_string(),
            figure: "C".to_string(),
        };

        let message = error.to_string();
        assert!(message.contains("Basic Problem B-04"));
        assert!(message.contains("'C'"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("matched_image_threshold", &1.5, &"must lie between 0 and 1");

        let message = error.to_string();
        assert!(message.contains("matched_image_threshold"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must lie between 0 and 1"));
    }

    // Tests InvalidProblem helper keeps the reason
    // Verified by dropping the reason
    #[test]
    fn test_invalid_problem_error() {
        let error = invalid_problem(&"p1", &"unrecognized problem type '4x4'");

        assert!(matches!(error, SolverError::InvalidProblem { .. }));
        assert!(error.to_string().contains("4x4"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = SolverError::ImageExport {
            path: PathBuf::from("/restricted/start.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/start.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions from foreign errors
    // Verified by mapping io errors to image errors
    #[test]
    fn test_from_conversions() {
        let io_error = std::io::Error::other("disk full");
        assert!(matches!(
            SolverError::from(io_error),
            SolverError::FileSystem { .. }
        ));

        let image_error = image::ImageError::IoError(std::io::Error::other("truncated"));
        assert!(matches!(
            SolverError::from(image_error),
            SolverError::ImageLoad { .. }
        ));
    }
}
