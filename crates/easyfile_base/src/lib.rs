/* 📖 # Why have easyfile_base as a separate crate?
easyfile_base holds the error type, tracing setup and the platform abstraction layer.
The handle logic in easyfile_core only talks to the platform through the Pal trait,
so it can be tested against MockPal without touching the disk.
*/

pub mod error;
mod error_tests;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{EasyFileError, EasyFileResult, ErrorKind, ResultExt};
pub use pal::{FilePath, MockPal, NativeFile, OpenFlags, Pal, PalHandle, RealPal};
