//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use eternity_solver::PuzzleError;
    use eternity_solver::io::error::{WithPath, invalid_parameter, invalid_path};
    use eternity_solver::spatial::tiles::Category;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PuzzleError::PiecesLoad {
            path: "/tmp/e2pieces.txt".into(),
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/e2pieces.txt"));
        assert!(error.to_string().contains("file not found"));
        assert!(invalid_path(&"loop").source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("max_depth", &1, &"depth less than 2 is not supported");

        assert_eq!(
            error.to_string(),
            "Invalid parameter 'max_depth' = '1': depth less than 2 is not supported"
        );
    }

    // Tests Contradiction names the tile and the cell already holding it
    // Verified by printing the cell as row then row
    #[test]
    fn test_contradiction_error() {
        let error = PuzzleError::Contradiction {
            category: Category::Corner,
            id: 2,
            row: 0,
            col: 15,
        };

        assert_eq!(
            error.to_string(),
            "Contradiction: corner 2 is already required at (0,15)"
        );
    }

    // Tests MalformedPiece reports the line number
    // Verified by printing the zero-based index
    #[test]
    fn test_malformed_piece_error() {
        let error = PuzzleError::MalformedPiece {
            line: 7,
            reason: "expected four colours".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed piece on line 7: expected four colours"
        );
    }

    // Tests I/O failures are wrapped with their path and operation
    // Verified by dropping the operation from the wrapped error
    #[test]
    fn test_with_path_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = result.with_path("/restricted/out.txt", "write tables").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("write tables"));
        assert!(message.contains("/restricted/out.txt"));
        assert!(message.contains("access denied"));

        let converted = PuzzleError::from(std::io::Error::other("boom"));
        assert!(matches!(
            converted,
            PuzzleError::FileSystem { ref path, .. } if *path == PathBuf::from("<unknown>")
        ));
    }
}
