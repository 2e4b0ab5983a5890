//! Output staging.
//!
//! The [`Stager`] executes a [`StagingPlan`]: for every planned add-in it
//! copies the descriptor, the loader binary and, when one can be found, the
//! config file into the output directory.

use crate::naming::with_stem_suffix;
use crate::{
    Bitness, ConfigCandidateSet, DEFAULT_CONFIG_NAME, FileSystem, LOADER_EXTENSION, LOG_TARGET,
    PackEntry, PackManifest, PlannedItem, StageConfig, StageError, StageResult, StagingPlan,
    VariantSpec,
};
use std::path::Path;
use tracing::{debug, info};

/// Copies planned add-ins into the output directory.
pub struct Stager<'a, F: FileSystem + ?Sized> {
    config: &'a StageConfig,
    fs: &'a F,
    configs: &'a ConfigCandidateSet,
}

impl<'a, F: FileSystem + ?Sized> Stager<'a, F> {
    /// Create a stager over the project's config candidates.
    pub fn new(config: &'a StageConfig, fs: &'a F, configs: &'a ConfigCandidateSet) -> Self {
        Self { config, fs, configs }
    }

    /// Stage every planned entry, one bit-width pass at a time.
    ///
    /// A `---` line separates the passes even when one of them is empty. The
    /// first failing copy aborts the run; earlier copies are kept.
    pub fn run(&self, plan: &StagingPlan<'_>) -> StageResult<PackManifest> {
        let mut manifest = PackManifest::new();

        for (pass, &bitness) in Bitness::all().iter().enumerate() {
            if pass > 0 {
                debug!(target: LOG_TARGET, "---");
            }

            for planned in plan.for_bitness(bitness) {
                if let Some(entry) = self.stage_item(planned)? {
                    manifest.push(entry);
                }
            }
        }

        Ok(manifest)
    }

    /// Stage one add-in, returning its manifest entry when packing is enabled.
    pub fn stage_item(&self, planned: &PlannedItem<'_>) -> StageResult<Option<PackEntry>> {
        let PlannedItem { item, bitness } = *planned;
        let variant = item.variant(bitness);

        self.copy_to_output(Path::new(&item.input_descriptor), &variant.output_descriptor)?;
        self.copy_to_output(self.config.loader(bitness), &variant.output_loader)?;

        if let Some(config_file) = self.resolve_config(variant) {
            self.copy_to_output(Path::new(config_file), &variant.output_config)?;
        }

        Ok(self.config.pack.then(|| self.pack_entry(variant)))
    }

    /// Find the config to stage next to `variant`'s loader.
    ///
    /// Tries the descriptor's own config, then the bit-width default
    /// (`App32.config`), then `App.config`. Returns the path as listed in the
    /// project.
    #[must_use]
    pub fn resolve_config(&self, variant: &VariantSpec) -> Option<&'a str> {
        let configs = self.configs;

        configs
            .find(&variant.input_config)
            .or_else(|| configs.find(&variant.input_config_fallback))
            .or_else(|| configs.find(DEFAULT_CONFIG_NAME))
    }

    fn pack_entry(&self, variant: &VariantSpec) -> PackEntry {
        let loader = match self.config.packed_suffix() {
            Some(suffix) => with_stem_suffix(&variant.output_loader, suffix, LOADER_EXTENSION),
            None => variant.output_loader.clone(),
        };

        PackEntry {
            descriptor: variant.output_descriptor.clone(),
            loader,
            config: variant.output_config.clone(),
        }
    }

    fn copy_to_output(&self, source: &Path, destination: &Path) -> StageResult<()> {
        info!(
            target: LOG_TARGET,
            "{} -> {}",
            self.fs.relative_path(source),
            self.fs.relative_path(destination)
        );

        if let Some(folder) = destination.parent()
            && !folder.as_os_str().is_empty()
            && !self.fs.dir_exists(folder)
        {
            self.fs
                .create_dir(folder)
                .map_err(|e| StageError::io("create directory", folder, e))?;
        }

        self.fs
            .copy_file(source, destination, true)
            .map_err(|e| StageError::io("copy to", destination, e))
    }
}
