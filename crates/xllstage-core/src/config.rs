//! Staging configuration

use crate::{Bitness, FileSystem, LOG_TARGET, StageError, StageResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Immutable configuration for one staging run.
///
/// Loaded from `xllstage.toml`:
///
/// ```toml
/// out_dir = "bin/Release"
/// loader32 = "tools/ExcelDna.xll"
/// loader64 = "tools/ExcelDna64.xll"
/// suffix32 = ""
/// suffix64 = "64"
/// pack = true
/// packed_suffix = "-packed"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    /// Directory the add-in files are staged into.
    pub out_dir: PathBuf,

    /// 32-bit native loader binary.
    pub loader32: PathBuf,

    /// 64-bit native loader binary.
    pub loader64: PathBuf,

    /// Build the 32-bit add-in.
    #[serde(default = "default_enabled")]
    pub create32: bool,

    /// Build the 64-bit add-in.
    #[serde(default = "default_enabled")]
    pub create64: bool,

    /// Name suffix of 32-bit descriptors.
    #[serde(default = "default_suffix32")]
    pub suffix32: String,

    /// Name suffix of 64-bit descriptors.
    #[serde(default = "default_suffix64")]
    pub suffix64: String,

    /// Record staged add-ins in the pack manifest.
    #[serde(default)]
    pub pack: bool,

    /// Inserted before `.xll` in the packed loader name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packed_suffix: Option<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_suffix32() -> String {
    "32".to_string()
}

fn default_suffix64() -> String {
    "64".to_string()
}

impl StageConfig {
    /// Create a configuration with default flags and suffixes.
    pub fn new(
        out_dir: impl Into<PathBuf>,
        loader32: impl Into<PathBuf>,
        loader64: impl Into<PathBuf>,
    ) -> Self {
        Self {
            out_dir: out_dir.into(),
            loader32: loader32.into(),
            loader64: loader64.into(),
            create32: default_enabled(),
            create64: default_enabled(),
            suffix32: default_suffix32(),
            suffix64: default_suffix64(),
            pack: false,
            packed_suffix: None,
        }
    }

    /// Parse configuration from TOML.
    pub fn from_toml_str(content: &str) -> StageResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> StageResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StageError::io("read", path, e))?;

        Self::from_toml_str(&content)
    }

    /// Name suffix for the given bit-width.
    #[must_use]
    pub fn suffix(&self, bitness: Bitness) -> &str {
        match bitness {
            Bitness::X86 => &self.suffix32,
            Bitness::X64 => &self.suffix64,
        }
    }

    /// Loader binary for the given bit-width.
    #[must_use]
    pub fn loader(&self, bitness: Bitness) -> &Path {
        match bitness {
            Bitness::X86 => &self.loader32,
            Bitness::X64 => &self.loader64,
        }
    }

    /// Whether the given bit-width should be built at all.
    #[must_use]
    pub fn is_enabled(&self, bitness: Bitness) -> bool {
        match bitness {
            Bitness::X86 => self.create32,
            Bitness::X64 => self.create64,
        }
    }

    /// Packed loader suffix, if one is set and not blank.
    #[must_use]
    pub fn packed_suffix(&self) -> Option<&str> {
        self.packed_suffix
            .as_deref()
            .filter(|suffix| !suffix.trim().is_empty())
    }

    /// Validate values that do not need the file system.
    pub fn validate(&self) -> StageResult<()> {
        if self.out_dir.as_os_str().is_empty() {
            return Err(StageError::InvalidConfig(
                "out_dir is required".to_string(),
            ));
        }

        if self.suffix32.eq_ignore_ascii_case(&self.suffix64) {
            return Err(StageError::IdenticalSuffixes {
                suffix32: self.suffix32.clone(),
                suffix64: self.suffix64.clone(),
            });
        }

        Ok(())
    }

    /// Check everything that must hold before any file is touched.
    ///
    /// The suffixes must differ and both loaders must exist. Values are
    /// validated before the file system is consulted.
    pub fn check_preconditions<F: FileSystem + ?Sized>(&self, fs: &F) -> StageResult<()> {
        self.validate()?;

        for &bitness in Bitness::all() {
            let loader = self.loader(bitness);
            if !fs.file_exists(loader) {
                return Err(StageError::LoaderNotFound {
                    bitness,
                    path: loader.to_path_buf(),
                });
            }
        }

        Ok(())
    }

    /// Emit the effective arguments at debug level.
    pub(crate) fn log_diagnostics(&self, input_count: usize) {
        debug!(target: LOG_TARGET, "----Arguments----");
        debug!(target: LOG_TARGET, "FilesInProject: {input_count}");
        debug!(target: LOG_TARGET, "OutDirectory: {}", self.out_dir.display());
        debug!(target: LOG_TARGET, "Loader32: {}", self.loader32.display());
        debug!(target: LOG_TARGET, "Loader64: {}", self.loader64.display());
        debug!(target: LOG_TARGET, "Create32BitAddIn: {}", self.create32);
        debug!(target: LOG_TARGET, "Create64BitAddIn: {}", self.create64);
        debug!(target: LOG_TARGET, "FileSuffix32Bit: {}", self.suffix32);
        debug!(target: LOG_TARGET, "FileSuffix64Bit: {}", self.suffix64);
        debug!(target: LOG_TARGET, "-----------------");
    }
}
