//! End-to-end staging tests against a real directory.
//!
//! Each test lays out an add-in project in a temp dir, runs the whole
//! pipeline through [`xllstage_core::stage`], and inspects the output folder.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::prelude::*;
use xllstage_core::{PhysicalFs, StageConfig, StageError, stage};
use xllstage_logging::{CollectingSink, LogLevel, SinkLayer};

/// Helper to create a project directory with the given files.
///
/// Every file's content is its own name, so copies can be traced back.
fn create_project(files: &[&str]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for file in files {
        let path = temp_dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, file.as_bytes()).unwrap();
    }
    temp_dir
}

fn project_with_loaders(files: &[&str]) -> TempDir {
    let mut all = vec!["tools/ExcelDna.xll", "tools/ExcelDna64.xll"];
    all.extend_from_slice(files);
    create_project(&all)
}

fn config() -> StageConfig {
    StageConfig::new("bin", "tools/ExcelDna.xll", "tools/ExcelDna64.xll")
}

fn read_output(project: &TempDir, name: &str) -> String {
    fs::read_to_string(project.path().join("bin").join(name)).unwrap()
}

fn output_files(project: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(project.path().join("bin"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn stage___single_descriptor___emits_both_bitnesses() {
    let project = project_with_loaders(&["Book.dna"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Book.dna"]).unwrap();

    assert_eq!(
        output_files(&project),
        vec!["Book32.dna", "Book32.xll", "Book64.dna", "Book64.xll"]
    );
    assert_eq!(read_output(&project, "Book32.dna"), "Book.dna");
    assert_eq!(read_output(&project, "Book32.xll"), "tools/ExcelDna.xll");
    assert_eq!(read_output(&project, "Book64.xll"), "tools/ExcelDna64.xll");
}

#[test]
fn stage___explicit_32_bit_descriptor___is_not_overwritten_by_generic() {
    let project = project_with_loaders(&["Book.dna", "Book32.dna"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Book.dna", "Book32.dna"]).unwrap();

    assert_eq!(read_output(&project, "Book32.dna"), "Book32.dna");
}

#[test]
fn stage___descriptor_in_subdirectory___keeps_relative_layout() {
    let project = project_with_loaders(&["addins/Book.dna"]);
    let fs = PhysicalFs::new(project.path());
    let descriptor = Path::new("addins").join("Book.dna");

    stage(&config(), &fs, &[descriptor.to_string_lossy()]).unwrap();

    let staged = project.path().join("bin").join("addins").join("Book64.xll");
    assert!(staged.is_file());
}

#[test]
fn stage___existing_output___is_overwritten() {
    let project = project_with_loaders(&["Book.dna", "bin/Book32.dna"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Book.dna"]).unwrap();

    assert_eq!(read_output(&project, "Book32.dna"), "Book.dna");
}

#[test]
fn stage___non_descriptor_inputs___are_ignored() {
    let project = project_with_loaders(&["Book.dna", "Functions.cs", "Readme.md"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Functions.cs", "Book.dna", "Readme.md"]).unwrap();

    assert_eq!(output_files(&project).len(), 4);
}

#[test]
fn stage___no_descriptors___succeeds_without_output() {
    let project = project_with_loaders(&[]);
    let fs = PhysicalFs::new(project.path());

    let manifest = stage::<_, &str>(&config(), &fs, &[]).unwrap();

    assert!(manifest.is_empty());
    assert!(!project.path().join("bin").exists());
}

// ============================================================================
// Config files
// ============================================================================

#[test]
fn stage___config_priority___descriptor_then_bitness_default_then_app_config() {
    let project = project_with_loaders(&[
        "Book.dna",
        "Book32.config",
        "App32.config",
        "App64.config",
        "App.config",
    ]);
    let fs = PhysicalFs::new(project.path());
    let inputs = [
        "App.config",
        "App32.config",
        "App64.config",
        "Book.dna",
        "Book32.config",
    ];

    stage(&config(), &fs, &inputs).unwrap();

    assert_eq!(read_output(&project, "Book32.xll.config"), "Book32.config");
    assert_eq!(read_output(&project, "Book64.xll.config"), "App64.config");
}

#[test]
fn stage___only_app_config___is_used_for_both() {
    let project = project_with_loaders(&["Book.dna", "App.config"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Book.dna", "App.config"]).unwrap();

    assert_eq!(read_output(&project, "Book32.xll.config"), "App.config");
    assert_eq!(read_output(&project, "Book64.xll.config"), "App.config");
}

#[test]
fn stage___config_not_listed_in_project___is_not_staged() {
    // Present on disk but not among the project inputs
    let project = project_with_loaders(&["Book.dna", "App.config"]);
    let fs = PhysicalFs::new(project.path());

    stage(&config(), &fs, &["Book.dna"]).unwrap();

    assert!(!output_files(&project).iter().any(|f| f.ends_with(".config")));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn stage___missing_loader___fails_before_any_output() {
    let project = create_project(&["Book.dna", "tools/ExcelDna.xll"]);
    let fs = PhysicalFs::new(project.path());

    let err = stage(&config(), &fs, &["Book.dna"]).unwrap_err();

    assert!(matches!(err, StageError::LoaderNotFound { .. }));
    assert!(err.is_precondition());
    assert!(!project.path().join("bin").exists());
}

#[test]
fn stage___identical_suffixes___fails_before_any_output() {
    let project = project_with_loaders(&["Book.dna"]);
    let fs = PhysicalFs::new(project.path());
    let mut config = config();
    config.suffix32 = "X".to_string();
    config.suffix64 = "x".to_string();

    let err = stage(&config, &fs, &["Book.dna"]).unwrap_err();

    assert!(matches!(err, StageError::IdenticalSuffixes { .. }));
    assert!(!project.path().join("bin").exists());
}

#[test]
fn stage___missing_descriptor_file___fails_with_io_error() {
    let project = project_with_loaders(&[]);
    let fs = PhysicalFs::new(project.path());

    let err = stage(&config(), &fs, &["Ghost.dna"]).unwrap_err();

    assert!(matches!(err, StageError::Io { .. }));
    assert_eq!(err.error_code(), 3);
}

// ============================================================================
// Manifest
// ============================================================================

#[test]
fn stage___manifest_order___follows_sorted_descriptors_for_any_input_order() {
    let project = project_with_loaders(&["Alpha.dna", "Beta.dna", "Gamma.dna"]);
    let fs = PhysicalFs::new(project.path());
    let mut config = config();
    config.pack = true;
    config.create64 = false;

    let forward = stage(&config, &fs, &["Alpha.dna", "Beta.dna", "Gamma.dna"]).unwrap();
    let shuffled = stage(&config, &fs, &["Gamma.dna", "Alpha.dna", "Beta.dna"]).unwrap();

    assert_eq!(forward, shuffled);
    let descriptors: Vec<PathBuf> = forward
        .entries()
        .iter()
        .map(|e| e.descriptor.clone())
        .collect();
    assert_eq!(
        descriptors,
        vec![
            Path::new("bin").join("Alpha32.dna"),
            Path::new("bin").join("Beta32.dna"),
            Path::new("bin").join("Gamma32.dna"),
        ]
    );
}

#[test]
fn stage___manifest___lists_32_bit_entries_before_64_bit() {
    let project = project_with_loaders(&["Book.dna", "Other.dna"]);
    let fs = PhysicalFs::new(project.path());
    let mut config = config();
    config.pack = true;
    config.packed_suffix = Some("-packed".to_string());

    let manifest = stage(&config, &fs, &["Other.dna", "Book.dna"]).unwrap();

    let loaders: Vec<PathBuf> = manifest.entries().iter().map(|e| e.loader.clone()).collect();
    assert_eq!(
        loaders,
        vec![
            Path::new("bin").join("Book32-packed.xll"),
            Path::new("bin").join("Other32-packed.xll"),
            Path::new("bin").join("Book64-packed.xll"),
            Path::new("bin").join("Other64-packed.xll"),
        ]
    );
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn stage___diagnostics___reports_copies_and_arguments_to_sink() {
    let project = project_with_loaders(&["Book.dna"]);
    let fs = PhysicalFs::new(project.path());
    let sink = Arc::new(CollectingSink::new());
    let layer = SinkLayer::with_level(Arc::clone(&sink), LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        stage(&config(), &fs, &["Book.dna"]).unwrap();
    });

    let info = sink.messages_at_least(LogLevel::Info);
    let copy_32 = format!("Book.dna -> {}", Path::new("bin").join("Book32.dna").display());
    assert!(info.contains(&copy_32), "{info:?}");
    assert_eq!(info.len(), 4);

    let all: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
    assert!(all.contains(&"FilesInProject: 1".to_string()));
    assert!(all.contains(&"---".to_string()));
    assert!(sink.records().iter().all(|r| r.target == "xllstage"));
}

#[test]
fn stage___diagnostics___separates_passes_when_32_bit_is_disabled() {
    let project = project_with_loaders(&["Book.dna"]);
    let fs = PhysicalFs::new(project.path());
    let mut config = config();
    config.create32 = false;
    let sink = Arc::new(CollectingSink::new());
    let layer = SinkLayer::with_level(Arc::clone(&sink), LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::with_default(subscriber, || {
        stage(&config, &fs, &["Book.dna"]).unwrap();
    });

    let messages: Vec<String> = sink.records().into_iter().map(|r| r.message).collect();
    let separator = messages.iter().position(|m| m == "---").unwrap();
    let first_copy = messages.iter().position(|m| m.contains(" -> ")).unwrap();
    assert!(separator < first_copy, "{messages:?}");
    assert_eq!(messages.iter().filter(|m| *m == "---").count(), 1);
}
