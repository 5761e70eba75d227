/* 📖 # What is the Platform Abstraction Layer?

The PAL is the only place that touches the operating system's file API.
FileHandle holds a boxed NativeFile obtained through the Pal trait, so:
- RealPal opens files with std::fs::OpenOptions
- MockPal serves in-memory files with the same open semantics, for deterministic tests
*/

mod file_path;
pub mod mock;
pub mod real_pal;
mod traits;

pub use file_path::FilePath;
pub use mock::MockPal;
pub use real_pal::RealPal;
pub use traits::{NativeFile, OpenFlags, Pal, PalHandle};
