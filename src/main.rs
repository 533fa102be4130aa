//! Noisemix CLI - Noise Augmentation for Audio Datasets
//!
//! Command-line interface for the Noisemix mixing pipeline.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use noisemix::cli::commands;
use noisemix::cli::{Cli, Commands};
use noisemix::batch::{MixConfig, SingleConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Noisemix v{}", env!("CARGO_PKG_VERSION"));

    handle_command(cli.command)
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::File {
            input,
            noise,
            output,
            noise_factor,
        } => {
            let config = SingleConfig {
                input_path: input,
                noise_path: noise,
                output_path: output,
                mix: MixConfig::new(noise_factor),
            };
            commands::mix_file(&config)
                .with_context(|| format!("mixing {}", config.input_path.display()))
        }
        Commands::Folder {
            input_folder,
            output_folder,
            noise,
            noise_factor,
            continue_on_error,
            report,
        } => {
            let config = commands::folder_config(
                &input_folder,
                &output_folder,
                &noise,
                noise_factor,
                continue_on_error,
            );
            commands::mix_folder(&config, report.as_deref())
                .with_context(|| format!("processing folder {}", input_folder.display()))
        }
        Commands::Run { config, report } => commands::run_config(&config, report.as_deref())
            .with_context(|| format!("running {}", config.display())),
    }
}
