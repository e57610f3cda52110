//! Config Cache - Per-checkpoint sampler configuration persisted as JSON
//!
//! Maps a checkpoint identifier to its recorded sampler configuration
//! (steps, cfg, sampler, scheduler). The store is loaded lazily once per
//! cache instance, held in memory, and rewritten in full whenever a
//! record is added or changed.
//!
//! # Example
//!
//! ```no_run
//! use config_cache::ConfigCache;
//! use node_core::SamplerConfig;
//!
//! let cache = ConfigCache::new("model_configs.json");
//! let resolved = cache.resolve(
//!     "sdxl_base",
//!     false,
//!     SamplerConfig::new(30, 7.0, "euler", "normal"),
//! );
//! assert_eq!(resolved.steps, 30);
//! ```

mod store;

pub use store::ConfigCache;
