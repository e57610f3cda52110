//! Host Env - Host-provided facilities behind a trait seam
//!
//! The graph host owns checkpoint enumeration, path resolution, the
//! checkpoint loader, and the sampler/scheduler name lists. This crate
//! defines that contract (`HostEnv`) and ships a local-directory
//! implementation used for integration and tests.
//!
//! # Example
//!
//! ```no_run
//! use host_env::{DirectoryHost, HostEnv, LoadOptions};
//! use node_core::PluginConfig;
//!
//! # fn example() -> node_core::Result<()> {
//! let host = DirectoryHost::new(PluginConfig::new("/data/plugin"));
//! let path = host.resolve_checkpoint("sdxl_base.safetensors")?;
//! let loaded = host.load_checkpoint(&path, &LoadOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod directory;
mod host;

pub use directory::DirectoryHost;
pub use host::{HostEnv, LoadOptions, BUILTIN_SAMPLERS, BUILTIN_SCHEDULERS};
