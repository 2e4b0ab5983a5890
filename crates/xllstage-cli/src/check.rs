//! Check command implementation

use crate::project::{self, ConfigArgs};
use anyhow::{Context, Result};
use xllstage_core::{Bitness, PhysicalFs};

/// Check command implementation
pub fn run(args: &ConfigArgs) -> Result<()> {
    println!("Checking config: {}", args.config_path().display());

    let config = project::load_config(args)?;
    let fs = PhysicalFs::new(&args.project_dir);
    config
        .check_preconditions(&fs)
        .context("Configuration check failed")?;

    println!("✓ Output: {}", config.out_dir.display());
    for &bitness in Bitness::all() {
        let state = if config.is_enabled(bitness) {
            "enabled"
        } else {
            "disabled"
        };
        println!(
            "✓ {bitness} loader: {} (suffix '{}', {state})",
            config.loader(bitness).display(),
            config.suffix(bitness)
        );
    }
    if config.pack {
        println!(
            "✓ Packing: on (loader suffix '{}')",
            config.packed_suffix().unwrap_or_default()
        );
    }
    println!("\nConfiguration is valid!");

    Ok(())
}
