//! Stage command implementation

use crate::project::{self, ConfigArgs, InputArgs};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use xllstage_core::{PackManifest, PhysicalFs};

/// Manifest file written into the output directory when packing.
pub const MANIFEST_FILE_NAME: &str = "pack-manifest.json";

/// Run the stage command
pub fn run(
    config_args: &ConfigArgs,
    inputs: &InputArgs,
    manifest_out: Option<PathBuf>,
) -> Result<()> {
    let config = project::load_config(config_args)?;
    let project_dir = &config_args.project_dir;
    let inputs = project::gather_inputs(project_dir, inputs, &config.out_dir)?;

    let fs = PhysicalFs::new(project_dir);
    let manifest = xllstage_core::stage(&config, &fs, &inputs).context("Staging failed")?;

    let out_dir = project_dir.join(&config.out_dir);
    println!("✓ Staged add-ins into {}", out_dir.display());

    let manifest_path =
        manifest_out.or_else(|| config.pack.then(|| out_dir.join(MANIFEST_FILE_NAME)));
    if let Some(path) = manifest_path {
        write_manifest(&manifest, &path)?;
        println!("✓ Manifest: {} ({} add-ins)", path.display(), manifest.len());
        for entry in &manifest {
            println!("  {}", entry.loader.display());
        }
    }

    Ok(())
}

/// Write the manifest as pretty-printed JSON, creating parent directories.
pub fn write_manifest(manifest: &PackManifest, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;

    Ok(())
}
