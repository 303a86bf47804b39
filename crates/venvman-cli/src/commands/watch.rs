//! Live decoration updates driven by the file watcher
//!
//! Performs an initial scan, then keeps the venv-info cache subscribed to
//! pyvenv.cfg content changes and deletions, reprinting a venv's
//! decoration whenever its metadata moves.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::commands::scan;
use crate::common::GlobalOpts;
use venvman_config::Settings;
use venvman_core::cache::VenvInfoCache;
use venvman_core::watch::CacheWatcher;
use venvman_logger as logger;

pub fn handle_watch(path: Option<PathBuf>, opts: &GlobalOpts) -> Result<(), String> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    // Watcher events carry absolute paths; canonicalize so labels stay
    // relative to the watched root.
    let root = fs::canonicalize(&root)
        .map_err(|e| format!("Cannot watch {}: {}", root.display(), e))?;

    let settings = Arc::new(Settings::load().map_err(|e| e.to_string())?);
    let cache = Arc::new(VenvInfoCache::new());

    scan::handle_scan(Some(root.clone()), opts)?;

    let listener_root = root.clone();
    let listener_settings = Arc::clone(&settings);
    let listener_cache = Arc::clone(&cache);
    let _watcher = CacheWatcher::with_listener(Arc::clone(&cache), &root, move |cfg_path| {
        report_change(&listener_root, cfg_path, &listener_settings, &listener_cache);
    })
    .map_err(|e| e.to_string())?;

    println!(
        "Watching {} for pyvenv.cfg changes (Ctrl-C to stop)",
        root.display()
    );
    loop {
        std::thread::park();
    }
}

fn report_change(root: &Path, cfg_path: &Path, settings: &Settings, cache: &VenvInfoCache) {
    let Some(venv) = cfg_path.parent() else { return };
    logger::debug(&format!("pyvenv.cfg change at {}", cfg_path.display()));

    if cfg_path.exists() {
        println!("{}", scan::render_venv(root, venv, settings, cache));
    } else {
        println!(
            "{} (virtual environment metadata removed)",
            venv.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| venv.display().to_string())
        );
    }
}
