//! Project loading: configuration file, CLI overrides and input listing

use anyhow::{Context, Result, bail};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use xllstage_core::StageConfig;

/// Default configuration file name, looked up in the project directory.
pub const DEFAULT_CONFIG_FILE: &str = "xllstage.toml";

/// Output directory used when running without a configuration file.
pub const DEFAULT_OUT_DIR: &str = "bin";

/// Options that locate and override the staging configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the configuration file, relative to the project directory
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Add-in project directory (default: current directory)
    #[arg(short = 'C', long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Output directory, relative to the project directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// 32-bit loader binary
    #[arg(long)]
    pub loader32: Option<PathBuf>,

    /// 64-bit loader binary
    #[arg(long)]
    pub loader64: Option<PathBuf>,

    /// File name suffix of 32-bit descriptors
    #[arg(long)]
    pub suffix32: Option<String>,

    /// File name suffix of 64-bit descriptors
    #[arg(long)]
    pub suffix64: Option<String>,

    /// Skip the 32-bit add-ins
    #[arg(long)]
    pub no_32: bool,

    /// Skip the 64-bit add-ins
    #[arg(long)]
    pub no_64: bool,

    /// Record staged add-ins in the pack manifest
    #[arg(long)]
    pub pack: bool,

    /// Suffix inserted before `.xll` in packed loader names
    #[arg(long)]
    pub packed_suffix: Option<String>,
}

/// Options that select the project input files
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// File listing project inputs, one path per line
    #[arg(short, long)]
    pub inputs_file: Option<PathBuf>,

    /// Project files, relative to the project directory.
    /// When no inputs are given the project directory is listed.
    pub files: Vec<String>,
}

impl ConfigArgs {
    /// Resolved path of the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(&self.config)
    }

    fn apply_overrides(&self, config: &mut StageConfig) {
        if let Some(out_dir) = &self.out_dir {
            config.out_dir = out_dir.clone();
        }
        if let Some(loader) = &self.loader32 {
            config.loader32 = loader.clone();
        }
        if let Some(loader) = &self.loader64 {
            config.loader64 = loader.clone();
        }
        if let Some(suffix) = &self.suffix32 {
            config.suffix32 = suffix.clone();
        }
        if let Some(suffix) = &self.suffix64 {
            config.suffix64 = suffix.clone();
        }
        if self.no_32 {
            config.create32 = false;
        }
        if self.no_64 {
            config.create64 = false;
        }
        if self.pack {
            config.pack = true;
        }
        if let Some(suffix) = &self.packed_suffix {
            config.packed_suffix = Some(suffix.clone());
        }
    }
}

/// Load the configuration file and apply command-line overrides.
///
/// Without a configuration file both loaders must be given on the command
/// line.
pub fn load_config(args: &ConfigArgs) -> Result<StageConfig> {
    let path = args.config_path();

    let mut config = if path.is_file() {
        StageConfig::from_file(&path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?
    } else {
        match (&args.loader32, &args.loader64) {
            (Some(loader32), Some(loader64)) => {
                StageConfig::new(DEFAULT_OUT_DIR, loader32, loader64)
            }
            _ => bail!(
                "Config file not found: {} (pass --loader32 and --loader64 to run without one)",
                path.display()
            ),
        }
    };

    args.apply_overrides(&mut config);

    Ok(config)
}

/// Collect the project inputs.
///
/// Positional files and the inputs file are combined. When neither is given,
/// every file under `project_dir` is listed, except hidden directories and
/// `out_dir`.
pub fn gather_inputs(
    project_dir: &Path,
    inputs: &InputArgs,
    out_dir: &Path,
) -> Result<Vec<String>> {
    let mut files = inputs.files.clone();

    if let Some(list) = &inputs.inputs_file {
        let content = fs::read_to_string(list)
            .with_context(|| format!("Failed to read inputs file: {}", list.display()))?;
        files.extend(parse_input_list(&content));
    } else if files.is_empty() {
        files = list_project_files(project_dir, &project_dir.join(out_dir))?;
    }

    debug!(target: xllstage_core::LOG_TARGET, "Project inputs: {}", files.len());
    Ok(files)
}

/// Parse an inputs file: one path per line, blank lines and `#` comments skipped.
pub fn parse_input_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// List every file under `root` as a path relative to `root`, sorted.
pub fn list_project_files(root: &Path, skip_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    collect_files_recursive(root, skip_dir, &mut files)?;

    let mut relative: Vec<String> = files
        .iter()
        .filter_map(|path| path.strip_prefix(root).ok())
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    relative.sort();
    Ok(relative)
}

fn collect_files_recursive(dir: &Path, skip_dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();

        if path.is_dir() {
            if is_hidden(&path) || path == skip_dir {
                continue;
            }
            collect_files_recursive(&path, skip_dir, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}
