//! Read-through cache of parsed `pyvenv.cfg` contents
//!
//! Keyed by config-file path. Negative parse results are cached too, so a
//! venv without usable metadata is not re-read on every decoration pass.
//! Entries live until invalidated by a file event (see [`crate::watch`])
//! or the cache is cleared; keys are bounded by the number of venvs in a
//! workspace, so there is no eviction policy.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::pyvenv_cfg::{self, VenvInfo};
use venvman_logger as logger;

/// Process-wide memo of venv metadata, safe to share across threads.
#[derive(Debug, Default)]
pub struct VenvInfoCache {
    entries: DashMap<PathBuf, Option<VenvInfo>>,
}

impl VenvInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached info for a `pyvenv.cfg` path, parsing it on the
    /// first lookup. At most one parse happens per path between
    /// invalidations; a racing first lookup may parse twice, last write
    /// wins, which is fine because parsing is cheap and idempotent.
    pub fn get(&self, pyvenv_cfg_path: &Path) -> Option<VenvInfo> {
        self.entries
            .entry(pyvenv_cfg_path.to_path_buf())
            .or_insert_with(|| pyvenv_cfg::parse_pyvenv_cfg(pyvenv_cfg_path))
            .clone()
    }

    /// Convenience accessor for the Python version alone.
    pub fn get_version(&self, pyvenv_cfg_path: &Path) -> Option<String> {
        self.get(pyvenv_cfg_path).map(|info| info.version)
    }

    /// Drop the entry for a single path. The next `get` re-parses.
    pub fn invalidate(&self, pyvenv_cfg_path: &Path) {
        if self.entries.remove(pyvenv_cfg_path).is_some() {
            logger::debug(&format!(
                "Invalidated venv info for {}",
                pyvenv_cfg_path.display()
            ));
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
