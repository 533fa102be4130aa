//! CLI Command Implementations
//!
//! Turns parsed arguments into run configurations and drives the orchestrator.

use std::fs;
use std::path::Path;

use log::info;

use crate::batch::{
    process_folder, process_single, BatchReport, FolderConfig, MixConfig, RunConfig,
    SingleConfig,
};
use crate::error::{MixError, Result};

/// Mix noise into one file.
pub fn mix_file(config: &SingleConfig) -> Result<()> {
    info!(
        "Mixing {} into {} (noise factor {})",
        config.noise_path.display(),
        config.input_path.display(),
        config.mix.noise_factor
    );

    let written = process_single(
        &config.input_path,
        &config.noise_path,
        &config.output_path,
        &config.mix,
    )?;

    println!("Noisy file saved at: {}", config.output_path.display());
    println!("Samples written: {}", written);

    Ok(())
}

/// Mix noise into every file of a class-labeled folder.
pub fn mix_folder(config: &FolderConfig, report_path: Option<&Path>) -> Result<()> {
    info!(
        "Mixing {} into classes under {} -> {}",
        config.noise_path.display(),
        config.input_folder.display(),
        config.output_folder.display()
    );

    let report = process_folder(config)?;
    print_summary(&report);

    if let Some(path) = report_path {
        write_report(&report, path)?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Run whatever a configuration file describes.
pub fn run_config(config_path: &Path, report_path: Option<&Path>) -> Result<()> {
    info!("Loading configuration: {}", config_path.display());

    match RunConfig::from_json_file(config_path)? {
        RunConfig::File(single) => mix_file(&single),
        RunConfig::Folder(folder) => mix_folder(&folder, report_path),
    }
}

/// Build a folder configuration from CLI flags.
pub fn folder_config(
    input_folder: &Path,
    output_folder: &Path,
    noise: &Path,
    noise_factor: f64,
    continue_on_error: bool,
) -> FolderConfig {
    FolderConfig {
        input_folder: input_folder.to_path_buf(),
        output_folder: output_folder.to_path_buf(),
        noise_path: noise.to_path_buf(),
        mix: MixConfig::new(noise_factor),
        continue_on_error,
    }
}

fn print_summary(report: &BatchReport) {
    println!("{:-<60}", "");
    println!("Classes:  {}", report.classes.join(", "));
    println!("Written:  {}", report.written.len());
    println!("Skipped:  {}", report.skipped.len());
    println!("Failed:   {}", report.failures.len());

    for failure in &report.failures {
        println!(
            "  [{}] {}: {}",
            failure.error_code,
            failure.path.display(),
            failure.message
        );
    }
    println!("{:-<60}", "");
}

fn write_report(report: &BatchReport, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    fs::write(path, content).map_err(|e| MixError::file_access(path, e))
}
