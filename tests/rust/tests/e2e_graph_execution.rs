//! Simulates repeated graph runs against one plugin directory:
//! the host renders the schema, executes the node, and the side file
//! converges to the last non-custom widget values per checkpoint.

use std::fs;
use std::sync::Arc;

use host_env::{DirectoryHost, HostEnv};
use node_core::PluginConfig;
use switch_node::{
    default_mappings, GraphNode, InputWidget, NodeInputs, SWITCH_LOADER_CLASS,
};
use tempfile::TempDir;

fn setup() -> (TempDir, PluginConfig, Arc<DirectoryHost>) {
    let dir = TempDir::new().unwrap();
    let config = PluginConfig::new(dir.path());
    fs::create_dir_all(config.checkpoint_path()).unwrap();
    for name in ["anime.safetensors", "photo.safetensors", "sketch.ckpt"] {
        fs::write(config.checkpoint_path().join(name), b"weights").unwrap();
    }
    let host = Arc::new(DirectoryHost::new(config.clone()));
    (dir, config, host)
}

fn run(node: &Arc<dyn GraphNode>, ckpt: &str, steps: u32, sampler: &str) -> u32 {
    let outputs = node
        .execute(NodeInputs {
            ckpt_name: ckpt.to_string(),
            use_custom_input: false,
            steps,
            cfg: 7.0,
            sampler: sampler.to_string(),
            scheduler: "karras".to_string(),
        })
        .unwrap();
    outputs.steps
}

#[test]
fn test_schema_reflects_host_inventory() {
    let (_dir, config, host) = setup();
    let registry = default_mappings(host.clone(), &config).unwrap();
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    let schema = node.input_schema();
    match &schema.field("ckpt_name").unwrap().widget {
        InputWidget::Choice { options, .. } => {
            // Sorted inventory, non-checkpoint files excluded
            assert_eq!(
                options,
                &vec![
                    "anime.safetensors".to_string(),
                    "photo.safetensors".to_string(),
                    "sketch.ckpt".to_string(),
                ]
            );
        }
        other => panic!("Unexpected widget: {:?}", other),
    }

    match &schema.field("sampler").unwrap().widget {
        InputWidget::Choice { options, .. } => {
            assert_eq!(options.as_slice(), host.samplers());
        }
        other => panic!("Unexpected widget: {:?}", other),
    }
}

#[test]
fn test_repeated_runs_converge_per_checkpoint() {
    let (_dir, config, host) = setup();
    let registry = default_mappings(host, &config).unwrap();
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    // A sequence of graph runs with evolving widget values
    assert_eq!(run(&node, "anime.safetensors", 30, "euler"), 30);
    assert_eq!(run(&node, "photo.safetensors", 20, "ddim"), 20);
    assert_eq!(run(&node, "anime.safetensors", 30, "euler"), 30);
    assert_eq!(run(&node, "anime.safetensors", 45, "dpmpp_2m"), 45);
    assert_eq!(run(&node, "sketch.ckpt", 12, "lcm"), 12);

    // The side file holds the last non-custom values for each checkpoint
    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["anime"]["steps"], 45);
    assert_eq!(json["anime"]["sampler"], "dpmpp_2m");
    assert_eq!(json["photo"]["steps"], 20);
    assert_eq!(json["sketch"]["steps"], 12);
    assert_eq!(json.as_object().unwrap().len(), 3);

    // File is written with 4-space indentation for the host tooling
    assert!(text.contains("\n    \""));
}
