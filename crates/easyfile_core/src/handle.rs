use std::io::{self, Read, Write};

use tracing::{debug, instrument, trace, warn};

use easyfile_base::{
    EasyFileError, EasyFileResult, ErrorKind, FilePath, NativeFile, PalHandle,
};

use crate::mode::{AccessMode, ContentKind};

/* 📖 # Why does FileHandle hold an Option<OpenFile>?

The native file, the mode and the path live and die together. Bundling them in one
struct behind an Option means there is no way to observe a handle with a released
native file but a still-present mode, and "closed" is simply `None`. Every operation
goes through `gate()`, which turns `None` into `NotOpen` and a kind mismatch into
`WrongKind` before the native file is touched.

Closing is idempotent: `close()` takes the OpenFile out, so a second call finds
`None` and does nothing. `Drop` calls `close()`, so a handle that goes out of scope
on an early return still releases its file.
*/

/// A file opened in a validated mode, for either text or binary access.
///
/// Created by [`crate::EasyFs::open_text`] or [`crate::EasyFs::open_binary`].
///
/// # Examples
///
/// ```
/// use easyfile_base::{FilePath, MockPal, PalHandle};
/// use easyfile_core::EasyFs;
///
/// let fs = EasyFs::new(PalHandle::new(MockPal::new()));
/// let mut handle = fs.open_text("notes.txt", "w").unwrap();
/// assert_eq!(handle.write(b"first line\n").unwrap(), 11);
/// handle.close();
/// assert!(!handle.is_open());
/// ```
#[derive(Debug)]
pub struct FileHandle {
    open: Option<OpenFile>,
    read_chunk_size: usize,
}

#[derive(Debug)]
pub(crate) struct OpenFile {
    pub(crate) native: Box<dyn NativeFile>,
    pub(crate) mode: AccessMode,
    pub(crate) path: FilePath,
}

impl OpenFile {
    pub(crate) fn io_error(&self, source: io::Error) -> Box<EasyFileError> {
        Box::new(EasyFileError::file_error(self.path.as_path(), source))
    }

    /// Appends everything up to end-of-stream to `buffer`, `chunk_size` bytes per native read.
    pub(crate) fn read_chunks(
        &mut self,
        buffer: &mut Vec<u8>,
        chunk_size: usize,
    ) -> EasyFileResult<usize> {
        let mut chunk = vec![0u8; chunk_size];
        let mut total = 0;
        loop {
            match self.native.read(&mut chunk) {
                Ok(0) => break,
                Ok(read) => {
                    buffer.extend_from_slice(&chunk[..read]);
                    total += read;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.io_error(e)),
            }
        }
        Ok(total)
    }
}

impl FileHandle {
    /// Validates `raw_mode`, checks the target exists for read-only and read-write
    /// modes, then opens the native file.
    #[instrument(skip(pal, path, read_chunk_size), fields(path = %path))]
    pub(crate) fn open(
        pal: &PalHandle,
        path: FilePath,
        raw_mode: &str,
        kind: ContentKind,
        read_chunk_size: usize,
    ) -> EasyFileResult<Self> {
        if path.is_empty() {
            return Err(Box::new(EasyFileError::invalid_argument(
                "path must not be empty",
            )));
        }
        let mode = AccessMode::parse(raw_mode, kind)?;
        if mode.requires_existing_target() && !pal.file_exists(&path) {
            debug!(%mode, "refusing to open missing file");
            return Err(Box::new(EasyFileError::new(ErrorKind::TargetMissing {
                path: path.into_path_buf(),
            })));
        }
        let native = pal.open_file(&path, mode.open_flags())?;
        debug!(%mode, "handle opened");
        Ok(Self {
            open: Some(OpenFile { native, mode, path }),
            read_chunk_size,
        })
    }

    /// True while the handle owns a native file, a mode and a path.
    pub fn is_valid(&self) -> bool {
        self.open.is_some()
    }

    /// Same as [`FileHandle::is_valid`]: a closed handle keeps no partial state.
    pub fn is_open(&self) -> bool {
        self.is_valid()
    }

    /// Content kind fixed at open time, `None` once closed.
    pub fn kind(&self) -> Option<ContentKind> {
        self.open.as_ref().map(|open| open.mode.kind())
    }

    pub fn mode(&self) -> Option<AccessMode> {
        self.open.as_ref().map(|open| open.mode)
    }

    /// Path as given at open time, `None` once closed.
    pub fn path(&self) -> Option<&FilePath> {
        self.open.as_ref().map(|open| &open.path)
    }

    /// Flushes and releases the native file. A no-op on a closed handle.
    pub fn close(&mut self) {
        let Some(mut open) = self.open.take() else {
            trace!("close on a closed handle ignored");
            return;
        };
        if let Err(e) = open.native.flush() {
            warn!(path = %open.path, error = %e, "flush before close failed");
        }
        debug!(path = %open.path, mode = %open.mode, "handle closed");
    }

    pub(crate) fn read_chunk_size(&self) -> usize {
        self.read_chunk_size
    }

    /// Precondition for every read and write: open, and of the expected kind.
    pub(crate) fn gate(
        &mut self,
        operation: &'static str,
        expected: ContentKind,
    ) -> EasyFileResult<&mut OpenFile> {
        let open = self
            .open
            .as_mut()
            .ok_or_else(|| Box::new(EasyFileError::new(ErrorKind::NotOpen)))?;
        let found = open.mode.kind();
        if found != expected {
            return Err(Box::new(EasyFileError::new(ErrorKind::WrongKind {
                operation,
                expected: expected.as_str(),
                found: found.as_str(),
            })));
        }
        Ok(open)
    }
}

impl Drop for FileHandle {
    fn drop(&mut self) {
        self.close();
    }
}
