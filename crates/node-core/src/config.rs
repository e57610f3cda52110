//! Plugin configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of denoising steps offered by the steps widget
pub const DEFAULT_STEPS: u32 = 30;

/// Steps widget range
pub const STEPS_MIN: u32 = 1;
pub const STEPS_MAX: u32 = 200;

/// Default guidance scale offered by the cfg widget
pub const DEFAULT_CFG: f64 = 7.0;

/// Cfg widget range and slider step
pub const CFG_MIN: f64 = 0.1;
pub const CFG_MAX: f64 = 20.0;
pub const CFG_STEP: f64 = 0.1;

/// Plugin configuration
///
/// Describes where the plugin keeps its data on disk. The embedder
/// constructs this explicitly; nothing is derived from module location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Base directory for all plugin data
    pub data_dir: PathBuf,

    /// File name of the JSON config store, relative to `data_dir`
    pub config_file: String,

    /// Subdirectory holding checkpoint files
    pub checkpoint_dir: String,

    /// Subdirectory holding embedding files
    pub embedding_dir: String,

    /// Recognized checkpoint file extensions
    pub checkpoint_extensions: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            config_file: "model_configs.json".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            embedding_dir: "embeddings".to_string(),
            checkpoint_extensions: vec![
                "safetensors".to_string(),
                "ckpt".to_string(),
                "pt".to_string(),
            ],
        }
    }
}

impl PluginConfig {
    /// Create a configuration rooted at the given data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Full path of the JSON config store
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(&self.config_file)
    }

    /// Full path of the checkpoint directory
    pub fn checkpoint_path(&self) -> PathBuf {
        self.data_dir.join(&self.checkpoint_dir)
    }

    /// Full path of the embedding directory
    pub fn embedding_path(&self) -> PathBuf {
        self.data_dir.join(&self.embedding_dir)
    }

    /// Returns true if the file name carries a recognized checkpoint extension
    pub fn is_checkpoint_file(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy();
                self.checkpoint_extensions.iter().any(|e| e == ext.as_ref())
            })
            .unwrap_or(false)
    }
}
