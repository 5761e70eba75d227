use std::fs;
use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::{EasyFileError, EasyFileResult, error::ErrorKind};

use super::FilePath;
use super::traits::{NativeFile, OpenFlags, Pal};

/// PAL implementation backed by the real filesystem via `std::fs`.
///
/// File paths are joined onto a configured base directory before use.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal resolving paths against `base_dir`.
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> bool {
        let resolved = self.resolve_path(path);
        let exists = fs::File::open(&resolved).is_ok();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        exists
    }

    #[instrument(skip(self), fields(path = %path))]
    fn open_file(
        &self,
        path: &FilePath,
        flags: OpenFlags,
    ) -> EasyFileResult<Box<dyn NativeFile>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), ?flags, "opening file");
        let file = fs::OpenOptions::new()
            .read(flags.read)
            .write(flags.write)
            .append(flags.append)
            .create(flags.create)
            .truncate(flags.truncate)
            .open(&resolved)
            .map_err(|e| {
                debug!(error = %e, "failed to open file");
                Box::new(EasyFileError::new(ErrorKind::OpenFailed {
                    path: resolved,
                    source: e,
                }))
            })?;
        debug!("file opened successfully");
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, SeekFrom, Write};
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_file_exists_true() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("test.txt"), "content").unwrap();

        assert!(pal.file_exists(&FilePath::from("test.txt")));
    }

    #[test]
    fn test_file_exists_false() {
        let (_temp_dir, pal) = setup_test_dir();

        assert!(!pal.file_exists(&FilePath::from("nonexistent.txt")));
    }

    #[test]
    fn test_open_read_missing_file_fails() {
        let (_temp_dir, pal) = setup_test_dir();

        let err = pal
            .open_file(&FilePath::from("nonexistent.txt"), OpenFlags::READ)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::OpenFailed { .. }));
    }

    #[test]
    fn test_create_truncate_discards_content() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("test.txt"), "old content").unwrap();

        let mut file = pal
            .open_file(&FilePath::from("test.txt"), OpenFlags::CREATE_TRUNCATE)
            .unwrap();
        file.write_all(b"new").unwrap();
        drop(file);

        let content = fs::read_to_string(temp_dir.path().join("test.txt")).unwrap();
        assert_eq!(content, "new");
    }

    #[test]
    fn test_append_writes_at_end() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("log.txt"), "one\n").unwrap();
        let flags = OpenFlags {
            read: true,
            append: true,
            create: true,
            ..OpenFlags::default()
        };

        let mut file = pal.open_file(&FilePath::from("log.txt"), flags).unwrap();
        file.write_all(b"two\n").unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();

        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn test_read_file_to_string() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("test.txt"), "hello world").unwrap();

        let result = pal.read_file_to_string(&FilePath::from("test.txt")).unwrap();
        assert_eq!(result, "hello world");
    }
}
