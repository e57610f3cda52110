//! Local directory host implementation
//!
//! Serves checkpoints from a directory tree on the local filesystem.
//! Used as the integration surface for tests and for embedding the node
//! outside a full graph host.

use std::fs;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tracing::{debug, info};

use node_core::{
    CheckpointName, ClipHandle, Error, LoadedCheckpoint, ModelHandle, PluginConfig, Result,
    VaeHandle,
};

use crate::host::{HostEnv, LoadOptions, BUILTIN_SAMPLERS, BUILTIN_SCHEDULERS};

/// Host environment backed by a local directory tree
///
/// Checkpoints live under `<data_dir>/checkpoints`, embeddings under
/// `<data_dir>/embeddings`. Sampler and scheduler names are the built-in
/// lists.
#[derive(Debug, Clone)]
pub struct DirectoryHost {
    /// Directory layout and recognized extensions
    config: PluginConfig,

    /// Sampler names offered to the UI
    samplers: Vec<String>,

    /// Scheduler names offered to the UI
    schedulers: Vec<String>,
}

impl DirectoryHost {
    /// Create a host over the given plugin directory layout
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            samplers: BUILTIN_SAMPLERS.iter().map(|s| s.to_string()).collect(),
            schedulers: BUILTIN_SCHEDULERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The plugin configuration this host serves
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}

impl HostEnv for DirectoryHost {
    fn checkpoint_names(&self) -> Vec<CheckpointName> {
        let dir = self.config.checkpoint_path();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => {
                debug!(dir = %dir.display(), "Checkpoint directory not readable");
                return Vec::new();
            }
        };

        let mut names: Vec<CheckpointName> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| self.config.is_checkpoint_file(name))
            .collect();

        names.sort();
        names
    }

    fn resolve_checkpoint(&self, name: &str) -> Result<PathBuf> {
        let path = self.config.checkpoint_path().join(name);
        if self.config.is_checkpoint_file(name) && path.is_file() {
            Ok(path)
        } else {
            Err(Error::CheckpointNotFound {
                name: name.to_string(),
            })
        }
    }

    fn load_checkpoint(&self, path: &Path, options: &LoadOptions) -> Result<LoadedCheckpoint> {
        debug!(path = %path.display(), ?options, "Loading checkpoint");

        let data = fs::read(path).map_err(|e| Error::CheckpointLoad {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        if data.is_empty() {
            return Err(Error::CheckpointLoad {
                message: format!("{}: empty checkpoint file", path.display()),
            });
        }
        let data = Bytes::from(data);

        // The payload is shared between the handles; Bytes clones are
        // reference-counted, not copies.
        let clip = options.output_clip.then(|| ClipHandle { data: data.clone() });
        let vae = options.output_vae.then(|| VaeHandle { data: data.clone() });

        info!(
            path = %path.display(),
            size_bytes = data.len(),
            clip = clip.is_some(),
            vae = vae.is_some(),
            "Checkpoint loaded"
        );

        Ok(LoadedCheckpoint {
            model: ModelHandle::new(data),
            clip,
            vae,
        })
    }

    fn samplers(&self) -> &[String] {
        &self.samplers
    }

    fn schedulers(&self) -> &[String] {
        &self.schedulers
    }

    fn embedding_dirs(&self) -> Vec<PathBuf> {
        vec![self.config.embedding_path()]
    }
}
