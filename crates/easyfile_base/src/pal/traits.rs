use std::fmt::Debug;
use std::io::{Read, Seek, Write};
use std::sync::Arc;

use crate::EasyFileResult;

use super::file_path::FilePath;

/// The native file object a handle owns: anything that reads, writes and seeks.
///
/// `std::fs::File` and MockPal's in-memory file both qualify.
pub trait NativeFile: Read + Write + Seek + Send + Debug {}
impl<T: Read + Write + Seek + Send + Debug> NativeFile for T {}

/// Open semantics handed to the platform, one flag per `OpenOptions` switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags {
    pub read: bool,
    pub write: bool,
    pub append: bool,
    pub create: bool,
    pub truncate: bool,
}

impl OpenFlags {
    /// Read-only access to an existing file.
    pub const READ: OpenFlags = OpenFlags {
        read: true,
        write: false,
        append: false,
        create: false,
        truncate: false,
    };

    /// Write-only, creating the file or discarding its content.
    pub const CREATE_TRUNCATE: OpenFlags = OpenFlags {
        read: false,
        write: true,
        append: false,
        create: true,
        truncate: true,
    };

    /// True if writes are possible through these flags.
    pub fn writes(&self) -> bool {
        self.write || self.append
    }
}

/* 📖 # Why is Pal a trait instead of a struct?

FileHandle only needs two things from the platform: "can this path be read" and
"give me a native file opened like this". Putting those behind a trait lets the
handle tests run against MockPal while the CLI uses RealPal.
*/

/// Platform Abstraction Layer: the file operations the handle layer builds on.
pub trait Pal: Debug + Send + Sync + 'static {
    /// True iff the file at `path` can be opened for reading.
    /// Any failure (missing, permission denied, malformed path) reads as false.
    fn file_exists(&self, path: &FilePath) -> bool;

    /// Open the file at `path` with the given flags.
    ///
    /// Fails with `ErrorKind::OpenFailed` carrying the platform's error.
    fn open_file(&self, path: &FilePath, flags: OpenFlags)
    -> EasyFileResult<Box<dyn NativeFile>>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> EasyFileResult<String> {
        let mut file = self.open_file(path, OpenFlags::READ)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| Box::new(crate::EasyFileError::file_error(path.as_path(), e)))?;
        String::from_utf8(contents).map_err(|_e| crate::err!("File is not valid UTF-8: {}", path))
    }
}

/// Shared handle to a PAL implementation.
///
/// # Examples
///
/// ```no_run
/// use easyfile_base::{PalHandle, RealPal};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
