use easyfile_base::{EasyFileResult, FilePath, PalHandle};

use crate::config::EasyFileConfig;
use crate::handle::FileHandle;
use crate::mode::ContentKind;

/// Entry point binding a platform and a configuration.
///
/// Opens handles and runs the stateless path utilities ([`EasyFs::exists`],
/// [`EasyFs::size_of`], [`EasyFs::wipe`]).
#[derive(Debug, Clone)]
pub struct EasyFs {
    pal: PalHandle,
    config: EasyFileConfig,
}

impl EasyFs {
    pub fn new(pal: PalHandle) -> Self {
        Self {
            pal,
            config: EasyFileConfig::default(),
        }
    }

    /// Binds `pal` to `config`, failing if the config does not validate.
    pub fn with_config(pal: PalHandle, config: EasyFileConfig) -> EasyFileResult<Self> {
        config.validate()?;
        Ok(Self { pal, config })
    }

    pub fn pal(&self) -> &PalHandle {
        &self.pal
    }

    pub fn config(&self) -> &EasyFileConfig {
        &self.config
    }

    /// Opens `path` for text access. `mode` is one of `r`, `w`, `a`, `r+`, `w+`, `a+`,
    /// in any case.
    pub fn open_text(&self, path: impl Into<FilePath>, mode: &str) -> EasyFileResult<FileHandle> {
        self.open(path.into(), mode, ContentKind::Text)
    }

    /// Opens `path` for binary access. `mode` is one of `rb`, `wb`, `ab`, `r+b`, `w+b`,
    /// `a+b`, in any case.
    pub fn open_binary(
        &self,
        path: impl Into<FilePath>,
        mode: &str,
    ) -> EasyFileResult<FileHandle> {
        self.open(path.into(), mode, ContentKind::Binary)
    }

    fn open(&self, path: FilePath, mode: &str, kind: ContentKind) -> EasyFileResult<FileHandle> {
        FileHandle::open(&self.pal, path, mode, kind, self.config.read_chunk_size)
    }
}
