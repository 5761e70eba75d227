use serde::Deserialize;
use tracing::{debug, instrument};

use easyfile_base::{EasyFileResult, FilePath, PalHandle, ResultExt};

/// Chunk size used by `read_all` when no configuration overrides it.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 1024;

/// Name of the configuration file looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "easyfile.toml";

/// Settings for the handle layer, usually loaded from `easyfile.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EasyFileConfig {
    /// Bytes requested per native read by `read_all`.
    pub read_chunk_size: usize,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for EasyFileConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            log_filter: None,
        }
    }
}

impl EasyFileConfig {
    /// Parses a TOML document and validates the values.
    pub fn from_toml(source: &str) -> EasyFileResult<Self> {
        let config: EasyFileConfig =
            toml::from_str(source).map_err(|e| easyfile_base::err!("Invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the handle layer cannot work with.
    pub fn validate(&self) -> EasyFileResult<()> {
        if self.read_chunk_size == 0 {
            return Err(easyfile_base::err!(
                "Invalid config: read_chunk_size must be greater than 0"
            ));
        }
        Ok(())
    }
}

/// Loads configuration from `path`, falling back to defaults if it does not exist.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_config(pal: &PalHandle, path: &FilePath) -> EasyFileResult<EasyFileConfig> {
    if !pal.file_exists(path) {
        debug!("no config file, using defaults");
        return Ok(EasyFileConfig::default());
    }
    let source = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config {}", path))?;
    let config =
        EasyFileConfig::from_toml(&source).with_context(|| format!("Failed to load {}", path))?;
    debug!(?config, "config loaded");
    Ok(config)
}
