//! xllstage CLI - Stage Excel add-in build output
//!
//! Commands:
//! - `xllstage stage` - Copy descriptors, loaders and configs into the output directory
//! - `xllstage plan` - Show what would be staged, without copying
//! - `xllstage check` - Validate an xllstage.toml and its loader paths

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xllstage_logging::{LogLevel, init_logging};

mod check;
mod plan;
mod project;
mod stage;

use project::{ConfigArgs, InputArgs};

#[derive(Parser)]
#[command(name = "xllstage")]
#[command(author, version, about = "Stage 32-bit and 64-bit Excel add-ins", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stage every add-in of a project into the output directory
    Stage {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        inputs: InputArgs,

        /// Write the pack manifest to this file (default: <out-dir>/pack-manifest.json when packing)
        #[arg(short, long)]
        manifest_out: Option<PathBuf>,
    },

    /// Print the staging plan without touching the output directory
    Plan {
        #[command(flatten)]
        config: ConfigArgs,

        #[command(flatten)]
        inputs: InputArgs,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and check that both loaders exist
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level);

    match cli.command {
        Commands::Stage {
            config,
            inputs,
            manifest_out,
        } => {
            stage::run(&config, &inputs, manifest_out)?;
        }
        Commands::Plan {
            config,
            inputs,
            json,
        } => {
            plan::run(&config, &inputs, json)?;
        }
        Commands::Check { config } => {
            check::run(&config)?;
        }
    }

    Ok(())
}
