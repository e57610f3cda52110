//! Switch Node - Checkpoint loader with per-model sampler configuration
//!
//! This crate provides the graph node that ties the plugin together:
//! - **Schema**: declarative input widgets the host renders
//! - **Execution**: load a checkpoint and resolve its sampler configuration
//! - **Registration**: explicit class-name registry consumed by the host
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use host_env::DirectoryHost;
//! use node_core::PluginConfig;
//! use switch_node::{default_mappings, GraphNode, NodeInputs, SWITCH_LOADER_CLASS};
//!
//! # fn example() -> node_core::Result<()> {
//! let config = PluginConfig::new("/data/plugin");
//! let host = Arc::new(DirectoryHost::new(config.clone()));
//! let registry = default_mappings(host, &config)?;
//!
//! let node = registry.get(SWITCH_LOADER_CLASS)?;
//! let outputs = node.execute(NodeInputs {
//!     ckpt_name: "sdxl_base.safetensors".to_string(),
//!     use_custom_input: false,
//!     steps: 30,
//!     cfg: 7.0,
//!     sampler: "euler".to_string(),
//!     scheduler: "normal".to_string(),
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod node;
pub mod registry;
pub mod schema;

pub use node::{NodeInputs, NodeOutputs, SwitchLoader, CATEGORY, ENTRY_POINT, OUTPUT_NAMES};
pub use registry::{default_mappings, GraphNode, NodeRegistry, SWITCH_LOADER_CLASS};
pub use schema::{InputField, InputSchema, InputWidget};
