/* 📖 # What does easyfile_core provide?

A managed file handle on top of the platform abstraction in easyfile_base:
- `mode`: validation of the twelve access-mode strings
- `handle`: the open/close lifecycle and the integrity gate every operation passes
- `text` and `binary`: the two operation families, each refusing handles of the other kind
- `paths`: existence, size and wipe helpers that work on a path without a handle
- `config`: the `easyfile.toml` settings
*/

mod binary;
pub mod config;
pub mod fs;
pub mod handle;
mod handle_tests;
pub mod mode;
mod paths;
mod text;

pub use config::{EasyFileConfig, load_config};
pub use fs::EasyFs;
pub use handle::FileHandle;
pub use mode::{Access, AccessMode, ContentKind};
