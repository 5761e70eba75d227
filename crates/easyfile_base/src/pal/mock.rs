use std::collections::{HashMap, HashSet};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::EasyFileError;
use crate::EasyFileResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::{NativeFile, OpenFlags, Pal};

type SharedContent = Arc<Mutex<Vec<u8>>>;

/* 📖 # How does MockPal model open files?

Each stored file is an `Arc<Mutex<Vec<u8>>>`. Opening hands out a MockFile that
shares that buffer and keeps its own cursor, so writes through a handle are visible
to later opens and to `file_content` without waiting for a drop. The open flags are
enforced the way the OS would: reading a write-only file fails, append mode always
writes at the end, truncate clears the buffer at open time.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use easyfile_base::{FilePath, MockPal, Pal};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("test.txt"), b"content".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("test.txt")).unwrap();
/// assert_eq!(content, "content");
/// ```
#[derive(Debug, Clone)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, SharedContent>>>,
    denied: Arc<Mutex<HashSet<FilePath>>>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self {
            files: Arc::new(Mutex::new(HashMap::new())),
            denied: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a file to the mock storage, replacing any previous content.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files
            .lock()
            .unwrap()
            .insert(path, Arc::new(Mutex::new(content)));
    }

    /// Current content of a stored file.
    pub fn file_content(&self, path: &FilePath) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap();
        files.get(path).map(|content| content.lock().unwrap().clone())
    }

    /// Make every later open of `path` fail with a permission error.
    pub fn deny_open(&self, path: FilePath) {
        self.denied.lock().unwrap().insert(path);
    }

    fn is_denied(&self, path: &FilePath) -> bool {
        self.denied.lock().unwrap().contains(path)
    }
}

impl Default for MockPal {
    fn default() -> Self {
        Self::new()
    }
}

fn open_failed(path: &FilePath, kind: io::ErrorKind, message: &str) -> Box<EasyFileError> {
    Box::new(EasyFileError::new(ErrorKind::OpenFailed {
        path: path.as_path().to_path_buf(),
        source: io::Error::new(kind, format!("{}: {}", message, path)),
    }))
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> bool {
        !self.is_denied(path) && self.files.lock().unwrap().contains_key(path)
    }

    fn open_file(
        &self,
        path: &FilePath,
        flags: OpenFlags,
    ) -> EasyFileResult<Box<dyn NativeFile>> {
        if self.is_denied(path) {
            return Err(open_failed(
                path,
                io::ErrorKind::PermissionDenied,
                "Permission denied",
            ));
        }
        if !flags.read && !flags.writes() {
            return Err(open_failed(
                path,
                io::ErrorKind::InvalidInput,
                "No access requested",
            ));
        }

        let mut files = self.files.lock().unwrap();
        let content = match files.get(path).cloned() {
            Some(content) => content,
            None if flags.create => {
                let content = Arc::new(Mutex::new(Vec::new()));
                files.insert(path.clone(), Arc::clone(&content));
                content
            }
            None => {
                return Err(open_failed(
                    path,
                    io::ErrorKind::NotFound,
                    "File not found",
                ));
            }
        };
        if flags.truncate {
            content.lock().unwrap().clear();
        }

        Ok(Box::new(MockFile {
            content,
            position: 0,
            flags,
        }))
    }
}

/// Open file served by MockPal.
#[derive(Debug)]
struct MockFile {
    content: SharedContent,
    position: u64,
    flags: OpenFlags,
}

impl MockFile {
    fn lock(&self) -> io::Result<MutexGuard<'_, Vec<u8>>> {
        self.content
            .lock()
            .map_err(|_| io::Error::other("mock file content poisoned"))
    }
}

impl Read for MockFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.flags.read {
            return Err(io::Error::other("file not opened for reading"));
        }
        let data = self.lock()?;
        let start = usize::try_from(self.position)
            .unwrap_or(usize::MAX)
            .min(data.len());
        let count = buf.len().min(data.len() - start);
        buf[..count].copy_from_slice(&data[start..start + count]);
        drop(data);
        self.position += count as u64;
        Ok(count)
    }
}

impl Write for MockFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.flags.writes() {
            return Err(io::Error::other("file not opened for writing"));
        }
        let mut data = self.lock()?;
        let start = if self.flags.append {
            data.len()
        } else {
            usize::try_from(self.position)
                .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "position too large"))?
        };
        if start > data.len() {
            data.resize(start, 0);
        }
        let overlap = buf.len().min(data.len() - start);
        data[start..start + overlap].copy_from_slice(&buf[..overlap]);
        data.extend_from_slice(&buf[overlap..]);
        drop(data);
        self.position = (start + buf.len()) as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MockFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self.lock()?.len() as u64;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.position = target;
        Ok(target)
    }
}
