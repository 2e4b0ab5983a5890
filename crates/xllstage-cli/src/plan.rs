//! Plan command implementation

use crate::project::{self, ConfigArgs, InputArgs};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use xllstage_core::{Bitness, PhysicalFs, StageConfig, Stager, StagingPlan, classify, resolve};

/// Run the plan command
pub fn run(config_args: &ConfigArgs, inputs: &InputArgs, json: bool) -> Result<()> {
    let config = project::load_config(config_args)?;
    config.validate().context("Invalid configuration")?;

    let project_dir = &config_args.project_dir;
    let inputs = project::gather_inputs(project_dir, inputs, &config.out_dir)?;
    let fs = PhysicalFs::new(project_dir);

    print!("{}", render(&config, &fs, &inputs, json)?);

    Ok(())
}

/// Resolve the plan for `inputs` and render it as text or JSON.
pub fn render(
    config: &StageConfig,
    fs: &PhysicalFs,
    inputs: &[String],
    json: bool,
) -> Result<String> {
    let input_set = classify(inputs);
    let items = resolve(&input_set.descriptors, config);
    let plan = StagingPlan::build(&items, config);

    if json {
        let mut rendered =
            serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        rendered.push('\n');
        return Ok(rendered);
    }

    let stager = Stager::new(config, fs, &input_set.configs);
    let mut out = String::new();

    for &bitness in Bitness::all() {
        if !config.is_enabled(bitness) {
            writeln!(out, "{bitness} add-ins: disabled")?;
            continue;
        }

        writeln!(out, "{bitness} add-ins:")?;
        for planned in plan.for_bitness(bitness) {
            let variant = planned.item.variant(bitness);
            write!(
                out,
                "  {} -> {}",
                planned.item.input_descriptor,
                variant.output_descriptor.display()
            )?;
            if let Some(config_file) = stager.resolve_config(variant) {
                write!(out, " (config: {config_file})")?;
            }
            writeln!(out)?;
        }
    }

    writeln!(out, "\n{} add-ins planned", plan.len())?;
    Ok(out)
}
