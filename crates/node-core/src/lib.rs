//! Node Core - Foundation for the checkpoint switch-loader plugin
//!
//! Provides shared types, error handling, and plugin configuration
//! for the configuration cache and the graph node built on top of it.

pub mod config;
pub mod error;
pub mod types;

pub use config::PluginConfig;
pub use error::{Error, Result};
pub use types::*;
