//! CLI Module
//!
//! Command-line interface for Noisemix.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dsp::DEFAULT_NOISE_FACTOR;

/// Noisemix - mix recorded noise into clean audio for dataset augmentation
#[derive(Parser, Debug)]
#[command(name = "noisemix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mix noise into a single WAV file
    #[command(name = "file")]
    File {
        /// Clean input recording
        #[arg(short, long)]
        input: PathBuf,

        /// Noise recording to blend in
        #[arg(short, long)]
        noise: PathBuf,

        /// Where to write the mixed file (overwritten if present)
        #[arg(short, long)]
        output: PathBuf,

        /// Weight of the noise relative to the original
        #[arg(short = 'f', long, default_value_t = DEFAULT_NOISE_FACTOR)]
        noise_factor: f64,
    },

    /// Mix noise into every WAV file of a class-labeled folder
    #[command(name = "folder")]
    Folder {
        /// Root whose subdirectories are class labels
        #[arg(short, long)]
        input_folder: PathBuf,

        /// Root to mirror the classes into
        #[arg(short, long)]
        output_folder: PathBuf,

        /// Noise recording to blend in
        #[arg(short, long)]
        noise: PathBuf,

        /// Weight of the noise relative to the original
        #[arg(short = 'f', long, default_value_t = DEFAULT_NOISE_FACTOR)]
        noise_factor: f64,

        /// Log failing files and keep going instead of aborting
        #[arg(long)]
        continue_on_error: bool,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Run from a JSON configuration file
    #[command(name = "run")]
    Run {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Write a JSON summary of the run to this path (folder mode only)
        #[arg(long)]
        report: Option<PathBuf>,
    },
}
