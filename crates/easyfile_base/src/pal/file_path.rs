use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/* 📖 # Why wrap RelativePathBuf for FilePath?

A FilePath is the path exactly as the caller gave it at open time. It is stored
with forward-slash semantics and resolved against the PAL's base directory only
when the file is actually opened, so the handle's recorded path never changes.
No normalization happens here: `.` and `..` stay, and an absolute string is
passed through to the platform unchanged when joined onto the base directory.
*/

/// Path of a file as handed to the PAL, relative to its base directory.
///
/// # Examples
///
/// ```
/// use easyfile_base::FilePath;
///
/// let path = FilePath::from("logs/today.txt");
/// assert_eq!(path.to_string(), "logs/today.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// The path as given, for use with `Path::join` against a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.0.as_str())
    }

    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.0.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_str().is_empty()
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&String> for FilePath {
    fn from(s: &String) -> Self {
        Self(RelativePathBuf::from(s.as_str()))
    }
}

impl From<&FilePath> for FilePath {
    fn from(p: &FilePath) -> Self {
        p.clone()
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        Self(RelativePathBuf::from(p.to_string_lossy().into_owned()))
    }
}

impl From<PathBuf> for FilePath {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
