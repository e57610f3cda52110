//! JSON-backed configuration store
//!
//! Provides lazy load-once semantics with atomic full-overwrite writes
//! (write to .tmp, then rename) to prevent partial/corrupt files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use node_core::{CheckpointId, Error, Result, SamplerConfig};

/// Per-checkpoint sampler configuration cache
///
/// Constructed explicitly with the path of its JSON file. The file is read
/// at most once per cache instance; every change rewrites it in full. A
/// failed write leaves the in-memory map authoritative for the remainder
/// of the instance's lifetime.
pub struct ConfigCache {
    /// Path of the JSON store on disk
    path: PathBuf,

    /// In-memory entries, `None` until first access
    entries: RwLock<Option<HashMap<CheckpointId, SamplerConfig>>>,
}

impl ConfigCache {
    /// Create a cache over the given JSON file path
    ///
    /// The file is not touched until the first read or resolve.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: RwLock::new(None),
        }
    }

    /// Path of the underlying JSON file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve the configuration for a checkpoint
    ///
    /// With `use_custom_input` set, the candidate is returned unchanged and
    /// the store is not touched. Otherwise the candidate is compared against
    /// the stored record: a missing or differing record is written through
    /// to disk, a field-equal record is returned without any write.
    pub fn resolve(
        &self,
        ckpt_name: &str,
        use_custom_input: bool,
        candidate: SamplerConfig,
    ) -> SamplerConfig {
        if use_custom_input {
            debug!(ckpt_name, "Custom input requested, config store untouched");
            return candidate;
        }

        let mut guard = self.entries.write();
        let entries = guard.get_or_insert_with(|| self.load_from_disk());

        match entries.get(ckpt_name) {
            Some(stored) if *stored == candidate => {
                debug!(ckpt_name, "Stored config matches inputs, no write");
                stored.clone()
            }
            _ => {
                entries.insert(ckpt_name.to_string(), candidate.clone());
                match self.persist(entries) {
                    Ok(()) => info!(ckpt_name, "Updated stored config"),
                    Err(e) => warn!(
                        ckpt_name,
                        error = %e,
                        "Failed to persist config store, in-memory store remains authoritative"
                    ),
                }
                candidate
            }
        }
    }

    /// Get the stored configuration for a checkpoint, if any
    pub fn get(&self, ckpt_name: &str) -> Option<SamplerConfig> {
        let mut guard = self.entries.write();
        let entries = guard.get_or_insert_with(|| self.load_from_disk());
        entries.get(ckpt_name).cloned()
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        let mut guard = self.entries.write();
        guard.get_or_insert_with(|| self.load_from_disk()).len()
    }

    /// Returns true if no records are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone of the full in-memory store
    pub fn snapshot(&self) -> HashMap<CheckpointId, SamplerConfig> {
        let mut guard = self.entries.write();
        guard.get_or_insert_with(|| self.load_from_disk()).clone()
    }

    /// Read the store from disk, falling back to empty on any failure
    fn load_from_disk(&self) -> HashMap<CheckpointId, SamplerConfig> {
        match fs::read_to_string(&self.path) {
            Ok(text) => match serde_json::from_str::<HashMap<CheckpointId, SamplerConfig>>(&text) {
                Ok(entries) => {
                    debug!(path = %self.path.display(), count = entries.len(), "Loaded config store");
                    entries
                }
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Malformed config store, starting empty"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config store on disk, starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read config store, starting empty"
                );
                HashMap::new()
            }
        }
    }

    /// Serialize the full store and overwrite the file atomically
    fn persist(&self, entries: &HashMap<CheckpointId, SamplerConfig>) -> Result<()> {
        // Host tooling expects 4-space indentation in the side file.
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::Store {
                    message: format!("Failed to create directory {:?}: {}", parent, e),
                })?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, &buf).map_err(|e| Error::Store {
            message: format!("Failed to write temp file {:?}: {}", temp_path, e),
        })?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(|e| Error::Store {
            message: format!(
                "Failed to rename {:?} to {:?}: {}",
                temp_path, self.path, e
            ),
        })?;

        debug!(path = %self.path.display(), count = entries.len(), "Config store written");
        Ok(())
    }

    /// Generate a unique temporary file path next to the store
    fn temp_path(&self) -> PathBuf {
        let temp_name = format!(
            ".{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            Uuid::new_v4()
        );
        self.path.with_file_name(temp_name)
    }
}
