//! Switch-loader node execution
//!
//! Loads a checkpoint through the host and resolves its sampler
//! configuration through the config cache, returning both to the graph.

use std::sync::Arc;

use tracing::{debug, info, warn};

use config_cache::ConfigCache;
use host_env::{HostEnv, LoadOptions};
use node_core::{
    checkpoint_stem, config, ClipHandle, ModelHandle, PluginConfig, Result, SamplerConfig,
    VaeHandle,
};

use crate::schema::{InputField, InputSchema, InputWidget};

/// Output tuple names, in return order
pub const OUTPUT_NAMES: [&str; 7] = [
    "MODEL",
    "CLIP",
    "VAE",
    "STEPS",
    "CFG",
    "SAMPLER",
    "SCHEDULER",
];

/// Entry-point operation name the host invokes
pub const ENTRY_POINT: &str = "select_config";

/// Display category in the host's node menu
pub const CATEGORY: &str = "Configuration";

/// Inputs gathered from the node's widgets
#[derive(Debug, Clone)]
pub struct NodeInputs {
    /// Checkpoint file name, with extension
    pub ckpt_name: String,

    /// Bypass the config store and use the widget values as-is
    pub use_custom_input: bool,

    /// Number of denoising steps
    pub steps: u32,

    /// Classifier-free guidance scale
    pub cfg: f64,

    /// Sampler name
    pub sampler: String,

    /// Scheduler name
    pub scheduler: String,
}

/// Fixed-arity output tuple
///
/// Model, CLIP, and VAE are absent when the loader failed; the scalar
/// fields always carry the resolved configuration.
#[derive(Debug, Clone)]
pub struct NodeOutputs {
    /// Loaded model, tagged with its checkpoint identifier
    pub model: Option<ModelHandle>,

    /// CLIP text encoder
    pub clip: Option<ClipHandle>,

    /// VAE
    pub vae: Option<VaeHandle>,

    /// Resolved number of denoising steps
    pub steps: u32,

    /// Resolved guidance scale
    pub cfg: f64,

    /// Resolved sampler name
    pub sampler: String,

    /// Resolved scheduler name
    pub scheduler: String,
}

impl NodeOutputs {
    /// Passthrough outputs with no model components
    fn fallback(inputs: &NodeInputs) -> Self {
        Self {
            model: None,
            clip: None,
            vae: None,
            steps: inputs.steps,
            cfg: inputs.cfg,
            sampler: inputs.sampler.clone(),
            scheduler: inputs.scheduler.clone(),
        }
    }
}

/// The switch-loader node
///
/// Owns its config cache; the host environment is shared with the rest of
/// the plugin surface.
pub struct SwitchLoader {
    /// Host facilities
    host: Arc<dyn HostEnv>,

    /// Per-checkpoint configuration store
    cache: ConfigCache,
}

impl SwitchLoader {
    /// Create a node over an explicit host and cache
    pub fn new(host: Arc<dyn HostEnv>, cache: ConfigCache) -> Self {
        Self { host, cache }
    }

    /// Create a node with its cache at the configured store path
    pub fn from_config(host: Arc<dyn HostEnv>, config: &PluginConfig) -> Self {
        Self::new(host, ConfigCache::new(config.config_path()))
    }

    /// The node's config cache
    pub fn cache(&self) -> &ConfigCache {
        &self.cache
    }

    /// Build the input schema from the host's current inventory
    pub fn input_schema(&self) -> InputSchema {
        InputSchema {
            required: vec![
                InputField {
                    name: "ckpt_name".to_string(),
                    widget: InputWidget::Choice {
                        options: self.host.checkpoint_names(),
                        tooltip: Some("Name of the checkpoint to load.".to_string()),
                    },
                },
                InputField {
                    name: "use_custom_input".to_string(),
                    widget: InputWidget::Boolean { default: false },
                },
                InputField {
                    name: "steps".to_string(),
                    widget: InputWidget::Int {
                        default: config::DEFAULT_STEPS,
                        min: config::STEPS_MIN,
                        max: config::STEPS_MAX,
                    },
                },
                InputField {
                    name: "cfg".to_string(),
                    widget: InputWidget::Float {
                        default: config::DEFAULT_CFG,
                        min: config::CFG_MIN,
                        max: config::CFG_MAX,
                        step: config::CFG_STEP,
                    },
                },
                InputField {
                    name: "sampler".to_string(),
                    widget: InputWidget::Choice {
                        options: self.host.samplers().to_vec(),
                        tooltip: None,
                    },
                },
                InputField {
                    name: "scheduler".to_string(),
                    widget: InputWidget::Choice {
                        options: self.host.schedulers().to_vec(),
                        tooltip: None,
                    },
                },
            ],
        }
    }

    /// Load the checkpoint and resolve its sampler configuration
    ///
    /// Path resolution failure is fatal. A loader failure degrades to the
    /// caller-supplied configuration with no model components and no store
    /// interaction.
    pub fn select_config(&self, inputs: NodeInputs) -> Result<NodeOutputs> {
        let ckpt_path = self.host.resolve_checkpoint(&inputs.ckpt_name)?;

        let options = LoadOptions::with_embeddings(self.host.embedding_dirs());
        let loaded = match self.host.load_checkpoint(&ckpt_path, &options) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(
                    ckpt_name = %inputs.ckpt_name,
                    error = %e,
                    "Error loading checkpoint, falling back to provided parameters"
                );
                return Ok(NodeOutputs::fallback(&inputs));
            }
        };

        let model_name = checkpoint_stem(&inputs.ckpt_name);
        let mut model = loaded.model;
        model.tag(model_name.clone());
        info!(model = %model_name, "Loaded model");

        let candidate = SamplerConfig::new(
            inputs.steps,
            inputs.cfg,
            inputs.sampler.clone(),
            inputs.scheduler.clone(),
        );
        let final_config = self
            .cache
            .resolve(&model_name, inputs.use_custom_input, candidate);
        debug!(model = %model_name, ?final_config, "Resolved config");

        Ok(NodeOutputs {
            model: Some(model),
            clip: loaded.clip,
            vae: loaded.vae,
            steps: final_config.steps,
            cfg: final_config.cfg,
            sampler: final_config.sampler,
            scheduler: final_config.scheduler,
        })
    }
}
