//! Build item resolution.
//!
//! Every descriptor in the project becomes one [`BuildItemSpec`] that holds
//! all names derived from it, for both bit-widths. Nothing here touches the
//! file system.

use crate::naming::with_bitness_suffix;
use crate::{
    Bitness, CONFIG_EXTENSION, DEFAULT_CONFIG_NAME, LOADER_CONFIG_EXTENSION, LOADER_EXTENSION,
    StageConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Resolved plan for one descriptor file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildItemSpec {
    /// Descriptor path as listed in the project.
    pub input_descriptor: String,

    /// Names for the 32-bit add-in.
    pub x86: VariantSpec,

    /// Names for the 64-bit add-in.
    pub x64: VariantSpec,
}

/// Derived names of one bit-width variant of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSpec {
    /// Descriptor name carrying this bit-width's suffix.
    pub input_descriptor: String,

    /// Config named after the derived descriptor (`Book32.config`).
    pub input_config: String,

    /// Project-wide default config for this bit-width (`App32.config`).
    pub input_config_fallback: String,

    /// Staged descriptor.
    pub output_descriptor: PathBuf,

    /// Staged loader binary.
    pub output_loader: PathBuf,

    /// Staged loader config (`Book32.xll.config`).
    pub output_config: PathBuf,
}

impl BuildItemSpec {
    /// Resolve every derived name of `descriptor`.
    pub fn new(descriptor: &str, config: &StageConfig) -> Self {
        Self {
            input_descriptor: descriptor.to_string(),
            x86: VariantSpec::new(descriptor, Bitness::X86, config),
            x64: VariantSpec::new(descriptor, Bitness::X64, config),
        }
    }

    /// Names for the given bit-width.
    #[must_use]
    pub fn variant(&self, bitness: Bitness) -> &VariantSpec {
        match bitness {
            Bitness::X86 => &self.x86,
            Bitness::X64 => &self.x64,
        }
    }

    /// Whether the descriptor is already named for `bitness`.
    ///
    /// Compared exactly; such a file always passes through.
    #[must_use]
    pub fn is_canonical_for(&self, bitness: Bitness) -> bool {
        self.input_descriptor == self.variant(bitness).input_descriptor
    }
}

impl VariantSpec {
    fn new(descriptor: &str, bitness: Bitness, config: &StageConfig) -> Self {
        let suffixes = [config.suffix32.as_str(), config.suffix64.as_str()];
        let suffix = config.suffix(bitness);

        let input_descriptor = with_bitness_suffix(descriptor, suffix, suffixes);
        let derived = Path::new(&input_descriptor);

        Self {
            input_config: change_extension(derived, CONFIG_EXTENSION),
            input_config_fallback: with_bitness_suffix(DEFAULT_CONFIG_NAME, suffix, suffixes),
            output_descriptor: config.out_dir.join(derived),
            output_loader: config.out_dir.join(derived.with_extension(LOADER_EXTENSION)),
            output_config: config
                .out_dir
                .join(derived.with_extension(LOADER_CONFIG_EXTENSION)),
            input_descriptor,
        }
    }
}

fn change_extension(path: &Path, extension: &str) -> String {
    path.with_extension(extension).to_string_lossy().into_owned()
}

/// Resolve a [`BuildItemSpec`] for each descriptor, keeping their order.
///
/// `descriptors` is expected to come from [`crate::classify`], already sorted
/// and free of duplicates.
pub fn resolve(descriptors: &[String], config: &StageConfig) -> Vec<BuildItemSpec> {
    descriptors
        .iter()
        .map(|descriptor| BuildItemSpec::new(descriptor, config))
        .collect()
}
