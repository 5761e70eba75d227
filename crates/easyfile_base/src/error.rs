use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Callers need to tell an invalid mode from a missing target from a wrong-kind call,
  so the kinds are an enum they can match on
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in easyfile operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// Access-mode string is not one of the whitelisted values for the requested kind
    InvalidMode { mode: String },

    /// A mode that must read an existing file was requested for a missing path
    TargetMissing { path: PathBuf },

    /// The platform refused to open the file
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Operation on a handle that has been closed
    NotOpen,

    /// Text operation on a binary handle or the reverse
    WrongKind {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Caller-supplied sizes or buffers are unusable
    InvalidArgument { message: String },

    /// Read, write or seek failed on an open file
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why separate ErrorKind and EasyFileError?
ErrorKind carries the structural variant callers match on.
EasyFileError wraps it with a context stack and the span trace captured at creation,
so context can be attached during propagation without nesting error types.
*/

/// Error type wrapping ErrorKind with context and a span trace.
pub struct EasyFileError {
    kind: ErrorKind,
    context: Vec<String>,
    span_trace: SpanTrace,
}

impl EasyFileError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a `Message` error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates an `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            message: message.into(),
        })
    }

    /// Creates a `FileError` for an I/O failure on `path`.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context, outermost first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the span trace captured when the error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for EasyFileError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for EasyFileError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::OpenFailed { source, .. } | ErrorKind::FileError { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

impl EasyFileError {
    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::InvalidMode { mode } => write!(f, "Invalid access mode '{}'", mode),
            ErrorKind::TargetMissing { path } => {
                write!(f, "File does not exist: {}", path.display())
            }
            ErrorKind::OpenFailed { path, source } => {
                write!(f, "Failed to open {}: {}", path.display(), source)
            }
            ErrorKind::NotOpen => write!(f, "File handle is not open"),
            ErrorKind::WrongKind {
                operation,
                expected,
                found,
            } => write!(
                f,
                "Cannot {} on a {} file handle (requires {})",
                operation, found, expected
            ),
            ErrorKind::InvalidArgument { message } => write!(f, "Invalid argument: {}", message),
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

impl fmt::Display for EasyFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        self.fmt_kind(f)
    }
}

/* 📖 # Why a hand-written Debug impl?
`{:?}` on an error is what ends up in logs and panics from tests. A tree with the
message first, then each context line, then the span trace reads better than the
derived struct dump.
*/
impl fmt::Debug for EasyFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_kind(f)?;
        writeln!(f)?;
        let last = self.context.len().saturating_sub(1);
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            writeln!(f, "{} {}", branch, ctx)?;
        }
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<EasyFileError> in the result type?

Boxing the error keeps the result small, which matters because byte counts are
returned from every read and write on the success path.
*/

/// Standard result type for easyfile operations.
pub type EasyFileResult<T> = std::result::Result<T, Box<EasyFileError>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> EasyFileResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> EasyFileResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for EasyFileResult<T> {
    fn context(self, context: impl Into<String>) -> EasyFileResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> EasyFileResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed `Message` error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::EasyFileError::message(format!($($arg)*)))
    };
}
