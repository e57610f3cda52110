//! Node class registry
//!
//! Explicit replacement for a host-global class mapping: the embedder
//! builds a registry and hands it to the host's extension API.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use node_core::{Error, NodeClassName, PluginConfig, Result};

use crate::node::{NodeInputs, NodeOutputs, SwitchLoader, CATEGORY, ENTRY_POINT, OUTPUT_NAMES};
use crate::schema::InputSchema;

/// Class name under which the switch loader registers
pub const SWITCH_LOADER_CLASS: &str = "ComfygSwitchLoader";

/// Contract a node exposes to the host graph
pub trait GraphNode: Send + Sync {
    /// Declarative input schema the host renders
    fn input_schema(&self) -> InputSchema;

    /// Output tuple names, in return order
    fn output_names(&self) -> &'static [&'static str];

    /// Entry-point operation name
    fn entry_point(&self) -> &'static str;

    /// Display category in the host's node menu
    fn category(&self) -> &'static str;

    /// Execute the node once, synchronously
    fn execute(&self, inputs: NodeInputs) -> Result<NodeOutputs>;
}

impl GraphNode for SwitchLoader {
    fn input_schema(&self) -> InputSchema {
        SwitchLoader::input_schema(self)
    }

    fn output_names(&self) -> &'static [&'static str] {
        &OUTPUT_NAMES
    }

    fn entry_point(&self) -> &'static str {
        ENTRY_POINT
    }

    fn category(&self) -> &'static str {
        CATEGORY
    }

    fn execute(&self, inputs: NodeInputs) -> Result<NodeOutputs> {
        self.select_config(inputs)
    }
}

/// Registry mapping class names to node implementations
#[derive(Default)]
pub struct NodeRegistry {
    /// Registered nodes by class name
    nodes: DashMap<NodeClassName, Arc<dyn GraphNode>>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under a class name
    ///
    /// # Errors
    /// Returns `Error::NodeAlreadyRegistered` if the name is taken
    pub fn register(
        &self,
        class_name: impl Into<NodeClassName>,
        node: Arc<dyn GraphNode>,
    ) -> Result<()> {
        let class_name = class_name.into();
        if self.nodes.contains_key(&class_name) {
            return Err(Error::NodeAlreadyRegistered { class_name });
        }

        info!(class_name = %class_name, category = node.category(), "Registered node class");
        self.nodes.insert(class_name, node);
        Ok(())
    }

    /// Look up a node by class name
    ///
    /// # Errors
    /// Returns `Error::NodeNotFound` if no node is registered under the name
    pub fn get(&self, class_name: &str) -> Result<Arc<dyn GraphNode>> {
        self.nodes
            .get(class_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NodeNotFound {
                class_name: class_name.to_string(),
            })
    }

    /// Returns true if a class name is registered
    pub fn contains(&self, class_name: &str) -> bool {
        self.nodes.contains_key(class_name)
    }

    /// All registered class names, sorted
    pub fn class_names(&self) -> Vec<NodeClassName> {
        let mut names: Vec<NodeClassName> =
            self.nodes.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no classes are registered
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the registry this plugin exports to the host
pub fn default_mappings(
    host: Arc<dyn host_env::HostEnv>,
    config: &PluginConfig,
) -> Result<NodeRegistry> {
    let registry = NodeRegistry::new();
    registry.register(
        SWITCH_LOADER_CLASS,
        Arc::new(SwitchLoader::from_config(host, config)),
    )?;
    Ok(registry)
}
