//! Bit-width variant resolution and output staging for Excel add-ins
//!
//! Given the flat list of files in an add-in project, this crate works out
//! which `.dna` descriptors to emit as 32-bit and 64-bit add-ins, what they
//! should be called, and which `.config` file goes with each of them. It then
//! stages the build output and returns a [`PackManifest`] for the packing step.
//!
//! # Output Layout
//!
//! ```text
//! bin/Release/
//! ├── Book32.dna
//! ├── Book32.xll           # copy of the 32-bit loader
//! ├── Book32.xll.config    # Book32.config, App32.config or App.config
//! ├── Book64.dna
//! ├── Book64.xll           # copy of the 64-bit loader
//! └── Book64.xll.config
//! ```
//!
//! # Pipeline
//!
//! 1. [`classify`] splits the inputs into descriptors and config candidates.
//! 2. [`resolve`] computes a [`BuildItemSpec`] per descriptor.
//! 3. [`StagingPlan::build`] decides which `(item, bitness)` pairs to emit.
//! 4. [`Stager`] performs the copies and fills the manifest.
//!
//! # Example
//!
//! ```no_run
//! use xllstage_core::{PhysicalFs, StageConfig};
//!
//! let config = StageConfig::new("bin/Release", "tools/ExcelDna.xll", "tools/ExcelDna64.xll");
//! let fs = PhysicalFs::new("my-addin");
//! let inputs = ["Book.dna", "App.config", "Book.cs"];
//!
//! let manifest = xllstage_core::stage(&config, &fs, &inputs)?;
//! for entry in &manifest {
//!     println!("{}", entry.descriptor.display());
//! }
//! # Ok::<(), xllstage_core::StageError>(())
//! ```

mod bitness;
mod classify;
mod config;
mod decision;
mod error;
mod manifest;
mod resolve;

pub mod fs;
pub mod naming;
pub mod stager;

pub use bitness::Bitness;
pub use classify::{ConfigCandidateSet, InputSet, classify};
pub use config::StageConfig;
pub use decision::{PlannedItem, StagingPlan};
pub use error::StageError;
pub use fs::{FileSystem, PhysicalFs};
pub use manifest::{PackEntry, PackManifest};
pub use resolve::{BuildItemSpec, VariantSpec, resolve};
pub use stager::Stager;

use tracing::debug;

/// Result type for staging operations.
pub type StageResult<T> = Result<T, StageError>;

/// Extension of add-in descriptor files.
pub const DESCRIPTOR_EXTENSION: &str = "dna";

/// Extension of configuration files.
pub const CONFIG_EXTENSION: &str = "config";

/// Extension of the native loader binary.
pub const LOADER_EXTENSION: &str = "xll";

/// Extension of the config file staged next to a loader.
pub const LOADER_CONFIG_EXTENSION: &str = "xll.config";

/// Project-wide default configuration file.
pub const DEFAULT_CONFIG_NAME: &str = "App.config";

/// Tracing target used for all diagnostics emitted by the pipeline.
pub const LOG_TARGET: &str = "xllstage";

/// Run the whole pipeline: validate, classify, resolve, plan and stage.
///
/// Preconditions are checked before any file I/O. On failure nothing is
/// returned; files copied before the failure are left in place.
pub fn stage<F, S>(config: &StageConfig, fs: &F, inputs: &[S]) -> StageResult<PackManifest>
where
    F: FileSystem + ?Sized,
    S: AsRef<str>,
{
    config.log_diagnostics(inputs.len());
    config.check_preconditions(fs)?;

    let input_set = classify(inputs);
    debug!(
        target: LOG_TARGET,
        "Descriptors: {}, config files: {}",
        input_set.descriptors.len(),
        input_set.configs.len()
    );

    let items = resolve(&input_set.descriptors, config);
    let plan = StagingPlan::build(&items, config);

    Stager::new(config, fs, &input_set.configs).run(&plan)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Bitness, BuildItemSpec, FileSystem, PackEntry, PackManifest, PhysicalFs, StageConfig,
        StageError, StageResult, StagingPlan, stage,
    };
}
