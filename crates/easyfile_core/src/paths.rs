use std::io::{Seek, SeekFrom};

use tracing::{debug, instrument};

use easyfile_base::{EasyFileError, EasyFileResult, ErrorKind, FilePath, OpenFlags};

use crate::fs::EasyFs;

impl EasyFs {
    /// True iff `path` can be opened for reading. Missing files, permission
    /// problems and malformed paths all report false.
    pub fn exists(&self, path: impl Into<FilePath>) -> bool {
        let path = path.into();
        !path.is_empty() && self.pal().file_exists(&path)
    }

    /// Length of the file in bytes, measured by seeking to its end.
    ///
    /// A missing file is `TargetMissing`, never a size of 0.
    #[instrument(skip(self, path), fields(path = tracing::field::Empty))]
    pub fn size_of(&self, path: impl Into<FilePath>) -> EasyFileResult<u64> {
        let path = path.into();
        tracing::Span::current().record("path", tracing::field::display(&path));
        if !self.exists(&path) {
            return Err(Box::new(EasyFileError::new(ErrorKind::TargetMissing {
                path: path.into_path_buf(),
            })));
        }
        let mut native = self.pal().open_file(&path, OpenFlags::READ)?;
        let size = native
            .seek(SeekFrom::End(0))
            .map_err(|e| Box::new(EasyFileError::file_error(path.as_path(), e)))?;
        debug!(size, "measured file size");
        Ok(size)
    }

    /// Truncates `path` to an empty file, creating it if needed.
    ///
    /// Fails with `OpenFailed` if the file cannot be opened for writing.
    #[instrument(skip(self, path), fields(path = tracing::field::Empty))]
    pub fn wipe(&self, path: impl Into<FilePath>) -> EasyFileResult<()> {
        let path = path.into();
        tracing::Span::current().record("path", tracing::field::display(&path));
        if path.is_empty() {
            return Err(Box::new(EasyFileError::invalid_argument(
                "path must not be empty",
            )));
        }
        drop(self.pal().open_file(&path, OpenFlags::CREATE_TRUNCATE)?);
        debug!("file wiped");
        Ok(())
    }
}
