use std::fs;
use std::sync::Arc;

use config_cache::ConfigCache;
use host_env::DirectoryHost;
use node_core::{PluginConfig, SamplerConfig};
use switch_node::{default_mappings, NodeInputs, NodeRegistry, SWITCH_LOADER_CLASS};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// Helper to lay out a plugin directory with a couple of checkpoints
fn setup_plugin_dir() -> (TempDir, PluginConfig) {
    let dir = TempDir::new().unwrap();
    let config = PluginConfig::new(dir.path());
    fs::create_dir_all(config.checkpoint_path()).unwrap();
    fs::write(
        config.checkpoint_path().join("sdxl_base.safetensors"),
        b"sdxl weights",
    )
    .unwrap();
    fs::write(
        config.checkpoint_path().join("v1-5-pruned.ckpt"),
        b"sd15 weights",
    )
    .unwrap();
    (dir, config)
}

fn build_registry(config: &PluginConfig) -> NodeRegistry {
    let host = Arc::new(DirectoryHost::new(config.clone()));
    default_mappings(host, config).unwrap()
}

fn inputs(ckpt_name: &str, steps: u32) -> NodeInputs {
    NodeInputs {
        ckpt_name: ckpt_name.to_string(),
        use_custom_input: false,
        steps,
        cfg: 7.0,
        sampler: "euler".to_string(),
        scheduler: "normal".to_string(),
    }
}

#[test]
fn test_full_flow() {
    init_tracing();
    let (_dir, config) = setup_plugin_dir();

    // 1. Build the registry the plugin exports
    let registry = build_registry(&config);
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    // 2. First execution stores the widget values for this checkpoint
    let outputs = node.execute(inputs("sdxl_base.safetensors", 30)).unwrap();
    assert_eq!(
        outputs.model.as_ref().unwrap().ckpt_name.as_deref(),
        Some("sdxl_base")
    );
    assert!(outputs.clip.is_some());
    assert!(outputs.vae.is_some());
    assert_eq!(outputs.steps, 30);

    // 3. The side file holds exactly the four config fields, keyed by stem
    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    let record = &json["sdxl_base"];
    assert_eq!(record["steps"], 30);
    assert_eq!(record["cfg"], 7.0);
    assert_eq!(record["sampler"], "euler");
    assert_eq!(record["scheduler"], "normal");
    assert_eq!(record.as_object().unwrap().len(), 4);

    // 4. Differing widget values overwrite the stored record
    let outputs = node.execute(inputs("sdxl_base.safetensors", 50)).unwrap();
    assert_eq!(outputs.steps, 50);
    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["sdxl_base"]["steps"], 50);

    // 5. Custom input passes through without touching the store
    let mut custom = inputs("sdxl_base.safetensors", 77);
    custom.use_custom_input = true;
    let outputs = node.execute(custom).unwrap();
    assert_eq!(outputs.steps, 77);
    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["sdxl_base"]["steps"], 50);

    // 6. Each checkpoint keeps its own record
    node.execute(inputs("v1-5-pruned.ckpt", 20)).unwrap();
    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["v1-5-pruned"]["steps"], 20);
    assert_eq!(json["sdxl_base"]["steps"], 50);
}

#[test]
fn test_fresh_process_round_trip() {
    init_tracing();
    let (_dir, config) = setup_plugin_dir();

    // First "process": record a config
    let registry = build_registry(&config);
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();
    node.execute(inputs("sdxl_base.safetensors", 50)).unwrap();
    drop(registry);

    // Second "process": a fresh cache over the same file sees the record
    let fresh = ConfigCache::new(config.config_path());
    assert_eq!(
        fresh.get("sdxl_base"),
        Some(SamplerConfig::new(50, 7.0, "euler", "normal"))
    );
    assert_eq!(fresh.len(), 1);
}

#[test]
fn test_loader_failure_degrades_to_inputs() {
    init_tracing();
    let (_dir, config) = setup_plugin_dir();
    fs::write(config.checkpoint_path().join("broken.safetensors"), b"").unwrap();

    let registry = build_registry(&config);
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    let outputs = node.execute(inputs("broken.safetensors", 42)).unwrap();
    assert!(outputs.model.is_none());
    assert!(outputs.clip.is_none());
    assert!(outputs.vae.is_none());
    assert_eq!(outputs.steps, 42);
    assert_eq!(outputs.sampler, "euler");

    // The failure path never touches the store
    assert!(!config.config_path().exists());
}

#[test]
fn test_malformed_store_recovers() {
    init_tracing();
    let (_dir, config) = setup_plugin_dir();
    fs::write(config.config_path(), "{ this is ] not json").unwrap();

    let registry = build_registry(&config);
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    // Execution succeeds against an empty store and rewrites the file
    let outputs = node.execute(inputs("sdxl_base.safetensors", 30)).unwrap();
    assert_eq!(outputs.steps, 30);

    let text = fs::read_to_string(config.config_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["sdxl_base"]["steps"], 30);
}

#[test]
fn test_unknown_checkpoint_fails_loudly() {
    init_tracing();
    let (_dir, config) = setup_plugin_dir();

    let registry = build_registry(&config);
    let node = registry.get(SWITCH_LOADER_CLASS).unwrap();

    let result = node.execute(inputs("does_not_exist.safetensors", 30));
    assert!(result.is_err());
    assert!(!result.unwrap_err().is_recoverable());
}
