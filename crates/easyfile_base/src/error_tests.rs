/* 📖 # Why use a separate file for these error tests?

Some cases here render errors inside tracing spans. Keeping them apart from the
error module means edits to error.rs do not shift what these tests observe.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{EasyFileError, EasyFileResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tracing::span;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    /// Set up tracing with ErrorLayer for tests.
    /// Uses `try_init()` to handle multiple tests running concurrently.
    fn setup_tracing_subscriber() {
        let _ = tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .try_init();
    }

    #[test]
    fn test_invalid_mode_display() {
        let error = EasyFileError::new(ErrorKind::InvalidMode {
            mode: "rw".to_string(),
        });
        expect!["Invalid access mode 'rw'"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_target_missing_display() {
        let error = EasyFileError::new(ErrorKind::TargetMissing {
            path: PathBuf::from("data/missing.txt"),
        });
        expect!["File does not exist: data/missing.txt"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_wrong_kind_display() {
        let error = EasyFileError::new(ErrorKind::WrongKind {
            operation: "read a line",
            expected: "text",
            found: "binary",
        });
        expect!["Cannot read a line on a binary file handle (requires text)"]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_not_open_and_invalid_argument_display() {
        expect!["File handle is not open"]
            .assert_eq(&EasyFileError::new(ErrorKind::NotOpen).to_string());
        expect!["Invalid argument: element size must be positive"].assert_eq(
            &EasyFileError::invalid_argument("element size must be positive").to_string(),
        );
    }

    #[test]
    fn test_open_failed_has_source() {
        let error = EasyFileError::new(ErrorKind::OpenFailed {
            path: PathBuf::from("/root/locked.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        });
        assert!(error.source().is_some());
        assert_eq!(error.root_cause().to_string(), "access denied");
        expect!["Failed to open /root/locked.txt: access denied"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_file_error_has_source() {
        let error = EasyFileError::file_error(
            "out.txt",
            io::Error::new(io::ErrorKind::WriteZero, "disk full"),
        );
        assert!(error.source().is_some());
        expect!["File error at out.txt: disk full"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_kind_without_source() {
        let error = EasyFileError::new(ErrorKind::NotOpen);
        assert!(error.source().is_none());
        assert_eq!(error.root_cause().to_string(), "File handle is not open");
    }

    #[test]
    fn test_error_context_attachment() {
        let error = EasyFileError::message("original error")
            .context("first context")
            .with_context(|| "second context".to_string());

        assert_eq!(error.get_context(), ["first context", "second context"]);
        assert_eq!(
            error.to_string(),
            "first context: second context: original error"
        );
    }

    #[test]
    fn test_error_from_kind() {
        let error: EasyFileError = ErrorKind::NotOpen.into();
        assert!(matches!(error.kind(), ErrorKind::NotOpen));
    }

    #[test]
    fn test_err_macro() {
        let error: Box<EasyFileError> = crate::err!("chunk size {} is too small", 0);
        expect!["chunk size 0 is too small"].assert_eq(&error.to_string());
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: EasyFileResult<i32> = Ok(42);
        assert_eq!(result.context("operation failed").unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: EasyFileResult<i32> = Err(Box::new(EasyFileError::message("root")));
        let err = result
            .context("step 1")
            .with_context(|| "step 2".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: root");
    }

    #[test]
    fn test_debug_tree_without_subscriber_span() {
        let error = EasyFileError::message("something went wrong")
            .context("while wiping")
            .context("in cli");

        let debug = format!("{:?}", error);
        assert!(debug.starts_with(
            "something went wrong\n├─ while wiping\n└─ in cli\n"
        ));
    }

    #[test]
    fn test_span_trace_captured_inside_span() {
        setup_tracing_subscriber();

        let operation_span = span!(tracing::Level::INFO, "open_text", mode = "r");
        let _guard = operation_span.enter();

        let error = EasyFileError::new(ErrorKind::TargetMissing {
            path: PathBuf::from("notes.txt"),
        });

        let debug = format!("{:?}", error);
        assert!(debug.starts_with("File does not exist: notes.txt\n"));
        assert!(debug.contains("open_text"));
    }
}
