/* 📖 # Why validate modes against a whitelist?

The platform's own open call would accept or reject a mode in its own way, and a typo
like "rw" could silently open a file in a mode nobody asked for. Checking against the
twelve known strings first gives one early, uniform `InvalidMode` error, and lets the
handle know its content kind and whether the target must already exist before any
native call is made.
*/

use std::fmt;

use easyfile_base::{EasyFileError, EasyFileResult, ErrorKind, OpenFlags};

/// Whether a handle was opened for text or binary access. Fixed at open time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Binary,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Binary => "binary",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six access semantics shared by text and binary modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// `r`: read an existing file.
    ReadOnly,
    /// `w`: write, creating the file or truncating it.
    WriteOnly,
    /// `a`: append, creating the file if needed.
    Append,
    /// `r+`: read and write an existing file.
    ReadWrite,
    /// `w+`: read and write, creating the file or truncating it.
    ReadWriteCreate,
    /// `a+`: read anywhere, append at the end, creating the file if needed.
    ReadAppend,
}

impl Access {
    const ALL: [Access; 6] = [
        Access::ReadOnly,
        Access::WriteOnly,
        Access::Append,
        Access::ReadWrite,
        Access::ReadWriteCreate,
        Access::ReadAppend,
    ];

    fn text_mode(&self) -> &'static str {
        match self {
            Access::ReadOnly => "r",
            Access::WriteOnly => "w",
            Access::Append => "a",
            Access::ReadWrite => "r+",
            Access::ReadWriteCreate => "w+",
            Access::ReadAppend => "a+",
        }
    }

    fn binary_mode(&self) -> &'static str {
        match self {
            Access::ReadOnly => "rb",
            Access::WriteOnly => "wb",
            Access::Append => "ab",
            Access::ReadWrite => "r+b",
            Access::ReadWriteCreate => "w+b",
            Access::ReadAppend => "a+b",
        }
    }

    fn open_flags(&self) -> OpenFlags {
        let none = OpenFlags::default();
        match self {
            Access::ReadOnly => OpenFlags::READ,
            Access::WriteOnly => OpenFlags::CREATE_TRUNCATE,
            Access::Append => OpenFlags {
                append: true,
                create: true,
                ..none
            },
            Access::ReadWrite => OpenFlags {
                read: true,
                write: true,
                ..none
            },
            Access::ReadWriteCreate => OpenFlags {
                read: true,
                write: true,
                create: true,
                truncate: true,
                ..none
            },
            Access::ReadAppend => OpenFlags {
                read: true,
                append: true,
                create: true,
                ..none
            },
        }
    }
}

/// A validated, normalized access mode.
///
/// # Examples
///
/// ```
/// use easyfile_core::{AccessMode, ContentKind};
///
/// let mode = AccessMode::parse("R+B", ContentKind::Binary).unwrap();
/// assert_eq!(mode.as_str(), "r+b");
/// assert!(mode.requires_existing_target());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessMode {
    access: Access,
    kind: ContentKind,
}

impl AccessMode {
    /// Lower-cases `raw` and checks it against the six modes allowed for `kind`.
    pub fn parse(raw: &str, kind: ContentKind) -> EasyFileResult<Self> {
        let normalized = raw.to_ascii_lowercase();
        Access::ALL
            .into_iter()
            .map(|access| AccessMode { access, kind })
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| {
                Box::new(EasyFileError::new(ErrorKind::InvalidMode {
                    mode: raw.to_string(),
                }))
            })
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Canonical lower-case mode string, e.g. `"a+"` or `"w+b"`.
    pub fn as_str(&self) -> &'static str {
        match self.kind {
            ContentKind::Text => self.access.text_mode(),
            ContentKind::Binary => self.access.binary_mode(),
        }
    }

    /// True for modes that can only read a file which already exists (`r`, `r+`).
    pub fn requires_existing_target(&self) -> bool {
        matches!(self.access, Access::ReadOnly | Access::ReadWrite)
    }

    /// Native open flags equivalent to this mode.
    pub fn open_flags(&self) -> OpenFlags {
        self.access.open_flags()
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
