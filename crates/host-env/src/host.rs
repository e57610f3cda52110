//! Host environment trait definition
//!
//! Defines the interface the node uses to reach host-owned facilities.

use std::path::{Path, PathBuf};

use node_core::{CheckpointName, LoadedCheckpoint, Result};

/// Sampler names enumerated by the host denoising loop
pub const BUILTIN_SAMPLERS: &[&str] = &[
    "euler",
    "euler_ancestral",
    "heun",
    "heunpp2",
    "dpm_2",
    "dpm_2_ancestral",
    "lms",
    "dpm_fast",
    "dpm_adaptive",
    "dpmpp_2s_ancestral",
    "dpmpp_sde",
    "dpmpp_2m",
    "dpmpp_2m_sde",
    "dpmpp_3m_sde",
    "ddpm",
    "lcm",
    "ddim",
    "uni_pc",
    "uni_pc_bh2",
];

/// Scheduler names enumerated by the host denoising loop
pub const BUILTIN_SCHEDULERS: &[&str] = &[
    "normal",
    "karras",
    "exponential",
    "sgm_uniform",
    "simple",
    "ddim_uniform",
    "beta",
];

/// Options passed to the host checkpoint loader
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Request the VAE alongside the model
    pub output_vae: bool,

    /// Request the CLIP text encoder alongside the model
    pub output_clip: bool,

    /// Embedding directories the loader may consult
    pub embedding_dirs: Vec<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            output_vae: true,
            output_clip: true,
            embedding_dirs: Vec::new(),
        }
    }
}

impl LoadOptions {
    /// Default options with the given embedding directories
    pub fn with_embeddings(embedding_dirs: Vec<PathBuf>) -> Self {
        Self {
            embedding_dirs,
            ..Default::default()
        }
    }
}

/// Trait for host-provided facilities
///
/// Implementors expose the host's checkpoint inventory and its loader.
/// Path resolution failures are fatal to the node; loader failures are
/// recoverable and handled by the caller.
pub trait HostEnv: Send + Sync {
    /// Names of all available checkpoint files, sorted
    fn checkpoint_names(&self) -> Vec<CheckpointName>;

    /// Resolve a checkpoint name to its full path
    ///
    /// # Errors
    /// Returns `Error::CheckpointNotFound` if the name is unknown
    fn resolve_checkpoint(&self, name: &str) -> Result<PathBuf>;

    /// Load a checkpoint, returning the model and the requested components
    ///
    /// # Errors
    /// Returns `Error::CheckpointLoad` if parsing the checkpoint fails
    fn load_checkpoint(&self, path: &Path, options: &LoadOptions) -> Result<LoadedCheckpoint>;

    /// Sampler names offered to the sampler widget
    fn samplers(&self) -> &[String];

    /// Scheduler names offered to the scheduler widget
    fn schedulers(&self) -> &[String];

    /// Embedding directories to hand to the loader
    fn embedding_dirs(&self) -> Vec<PathBuf>;
}
