//! Core type definitions for the switch-loader plugin

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Unique identifier types
pub type CheckpointName = String;
pub type CheckpointId = String;
pub type NodeClassName = String;

/// Sampler configuration recorded per checkpoint
///
/// Equality is plain field equality; sampler and scheduler are the
/// host-enumerated names compared as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Number of denoising steps
    pub steps: u32,

    /// Classifier-free guidance scale
    pub cfg: f64,

    /// Sampler name, one of the host-provided sampler names
    pub sampler: String,

    /// Scheduler name, one of the host-provided scheduler names
    pub scheduler: String,
}

impl SamplerConfig {
    /// Create a new sampler configuration
    pub fn new(steps: u32, cfg: f64, sampler: impl Into<String>, scheduler: impl Into<String>) -> Self {
        Self {
            steps,
            cfg,
            sampler: sampler.into(),
            scheduler: scheduler.into(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            steps: crate::config::DEFAULT_STEPS,
            cfg: crate::config::DEFAULT_CFG,
            sampler: "euler".to_string(),
            scheduler: "normal".to_string(),
        }
    }
}

/// Handle to a loaded diffusion model
///
/// The payload is opaque to this plugin; downstream nodes interpret it.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    /// Checkpoint identifier (file stem) tagged after a successful load
    pub ckpt_name: Option<CheckpointId>,

    /// Raw model payload
    pub data: Bytes,
}

impl ModelHandle {
    /// Create an untagged handle over a raw payload
    pub fn new(data: Bytes) -> Self {
        Self {
            ckpt_name: None,
            data,
        }
    }

    /// Tag the handle with the checkpoint it was loaded from
    pub fn tag(&mut self, ckpt_name: impl Into<CheckpointId>) {
        self.ckpt_name = Some(ckpt_name.into());
    }
}

/// Handle to the CLIP text encoder loaded alongside the model
#[derive(Debug, Clone)]
pub struct ClipHandle {
    /// Raw encoder payload
    pub data: Bytes,
}

/// Handle to the VAE loaded alongside the model
#[derive(Debug, Clone)]
pub struct VaeHandle {
    /// Raw VAE payload
    pub data: Bytes,
}

/// Components returned by the host loader for one checkpoint
#[derive(Debug, Clone)]
pub struct LoadedCheckpoint {
    /// Main diffusion model
    pub model: ModelHandle,

    /// CLIP text encoder, present when requested
    pub clip: Option<ClipHandle>,

    /// VAE, present when requested
    pub vae: Option<VaeHandle>,
}

/// Strip the extension from a checkpoint file name to get its identifier
pub fn checkpoint_stem(name: &str) -> CheckpointId {
    std::path::Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}
