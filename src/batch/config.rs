//! Run Configuration
//!
//! Parameter objects for single-file and folder runs. They can be built from
//! CLI flags or loaded from a JSON file such as:
//!
//! ```json
//! {
//!   "mode": "folder",
//!   "input_folder": "sound classes",
//!   "output_folder": "final classes",
//!   "noise_path": "noise1.wav",
//!   "noise_factor": 0.5
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dsp::conditioner::{validate_noise_factor, DEFAULT_NOISE_FACTOR};
use crate::error::{MixError, Result};

/// Mixing parameters shared by every file in a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixConfig {
    /// Weight applied to the peak-normalized noise before summation
    #[serde(default = "default_noise_factor")]
    pub noise_factor: f64,
}

fn default_noise_factor() -> f64 {
    DEFAULT_NOISE_FACTOR
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            noise_factor: DEFAULT_NOISE_FACTOR,
        }
    }
}

impl MixConfig {
    pub fn new(noise_factor: f64) -> Self {
        Self { noise_factor }
    }

    /// Reject negative or non-finite blend factors
    pub fn validate(&self) -> Result<()> {
        validate_noise_factor(self.noise_factor)
    }
}

/// Mix one noise file into one input file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleConfig {
    pub input_path: PathBuf,
    pub noise_path: PathBuf,
    pub output_path: PathBuf,
    #[serde(flatten)]
    pub mix: MixConfig,
}

/// Mix one noise file into every WAV of a class-labeled tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Root whose immediate subdirectories are class labels
    pub input_folder: PathBuf,
    /// Root the class structure is mirrored into
    pub output_folder: PathBuf,
    pub noise_path: PathBuf,
    #[serde(flatten)]
    pub mix: MixConfig,
    /// Log and record per-file failures instead of aborting the run
    #[serde(default)]
    pub continue_on_error: bool,
}

/// A complete run description, as stored in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RunConfig {
    File(SingleConfig),
    Folder(FolderConfig),
}

impl RunConfig {
    /// Load and validate a run description from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MixError::file_access(path, e))?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.mix().validate()?;
        Ok(config)
    }

    /// Mixing parameters of either mode
    pub fn mix(&self) -> &MixConfig {
        match self {
            RunConfig::File(single) => &single.mix,
            RunConfig::Folder(folder) => &folder.mix,
        }
    }
}
