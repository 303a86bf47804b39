//! File-event driven cache invalidation
//!
//! Subscribes an OS watcher to a directory tree and drops [`VenvInfoCache`]
//! entries whenever a `pyvenv.cfg` is rewritten or removed. Only
//! content-modify and remove events count; metadata-only changes are
//! ignored, as are events for any other file name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::event::ModifyKind;
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::cache::VenvInfoCache;
use crate::pyvenv_cfg::PYVENV_CFG;
use venvman_logger as logger;

/// Owns the OS watcher subscription for a cache.
///
/// Dropping the watcher detaches the subscription and clears the cache,
/// mirroring the lifecycle of the process-wide service that owns it.
pub struct CacheWatcher {
    cache: Arc<VenvInfoCache>,
    // Held for its Drop; the OS subscription lives exactly as long as this.
    _watcher: RecommendedWatcher,
}

impl CacheWatcher {
    /// Watch `root` recursively, invalidating `cache` on matching events.
    pub fn new(cache: Arc<VenvInfoCache>, root: &Path) -> Result<Self, notify::Error> {
        Self::with_listener(cache, root, |_| {})
    }

    /// Like [`CacheWatcher::new`], additionally calling `listener` with
    /// each invalidated path after the cache entry has been dropped.
    pub fn with_listener<F>(
        cache: Arc<VenvInfoCache>,
        root: &Path,
        listener: F,
    ) -> Result<Self, notify::Error>
    where
        F: Fn(&Path) + Send + 'static,
    {
        let handler_cache = Arc::clone(&cache);
        let mut watcher = recommended_watcher(move |result: Result<Event, notify::Error>| {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    logger::debug(&format!("Watcher error: {}", e));
                    return;
                }
            };
            for path in pyvenv_cfg_changes(&event) {
                handler_cache.invalidate(path);
                listener(path);
            }
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        logger::debug(&format!("Watching {} for pyvenv.cfg changes", root.display()));
        Ok(Self {
            cache,
            _watcher: watcher,
        })
    }
}

impl Drop for CacheWatcher {
    fn drop(&mut self) {
        self.cache.clear();
    }
}

/// Paths in `event` that should invalidate a cache entry.
fn pyvenv_cfg_changes(event: &Event) -> impl Iterator<Item = &PathBuf> {
    let relevant = is_invalidation_kind(&event.kind);
    event
        .paths
        .iter()
        .filter(move |path| relevant && is_pyvenv_cfg(path))
}

fn is_invalidation_kind(kind: &EventKind) -> bool {
    match kind {
        EventKind::Remove(_) => true,
        // Some backends report plain Modify(Any) for content writes.
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => true,
        _ => false,
    }
}

fn is_pyvenv_cfg(path: &Path) -> bool {
    path.file_name().and_then(|name| name.to_str()) == Some(PYVENV_CFG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};
    use std::fs;
    use tempfile::TempDir;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_content_change_on_pyvenv_cfg_matches() {
        let e = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Any)),
            "/proj/ve/pyvenv.cfg",
        );
        assert_eq!(pyvenv_cfg_changes(&e).count(), 1);
    }

    #[test]
    fn test_remove_on_pyvenv_cfg_matches() {
        let e = event(EventKind::Remove(RemoveKind::File), "/proj/ve/pyvenv.cfg");
        assert_eq!(pyvenv_cfg_changes(&e).count(), 1);
    }

    #[test]
    fn test_other_file_names_are_ignored() {
        let e = event(
            EventKind::Modify(ModifyKind::Data(DataChange::Any)),
            "/proj/ve/lib/setup.cfg",
        );
        assert_eq!(pyvenv_cfg_changes(&e).count(), 0);
    }

    #[test]
    fn test_metadata_and_create_kinds_are_ignored() {
        let metadata = event(
            EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)),
            "/proj/ve/pyvenv.cfg",
        );
        assert_eq!(pyvenv_cfg_changes(&metadata).count(), 0);

        let create = event(EventKind::Create(CreateKind::File), "/proj/ve/pyvenv.cfg");
        assert_eq!(pyvenv_cfg_changes(&create).count(), 0);
    }

    #[test]
    fn test_drop_clears_cache() {
        let dir = TempDir::new().unwrap();
        let cfg = dir.path().join(PYVENV_CFG);
        fs::write(&cfg, "version = 3.11.0\n").unwrap();

        let cache = Arc::new(VenvInfoCache::new());
        cache.get(&cfg);
        assert!(!cache.is_empty());

        let watcher = CacheWatcher::new(Arc::clone(&cache), dir.path()).expect("watcher");
        drop(watcher);
        assert!(cache.is_empty());
    }
}
