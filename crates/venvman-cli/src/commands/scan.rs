//! Scan a directory tree for virtual environments
//!
//! Each venv root found is printed as `<name><decoration>`, the same
//! rendering the project-view decoration used, e.g.
//! `ve [3.11.0 - CPython]`.

use std::path::{Path, PathBuf};

use colored::Colorize;
use walkdir::WalkDir;

use crate::common::GlobalOpts;
use venvman_config::Settings;
use venvman_core::cache::VenvInfoCache;
use venvman_core::detector;
use venvman_logger as logger;

pub fn handle_scan(path: Option<PathBuf>, _opts: &GlobalOpts) -> Result<(), String> {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        return Err(format!("Not a directory: {}", root.display()));
    }

    let settings = Settings::load().map_err(|e| e.to_string())?;
    let cache = VenvInfoCache::new();

    logger::spinner_start("Scanning for virtual environments...");
    let venvs = scan_tree(&root);
    logger::spinner_stop();

    if venvs.is_empty() {
        println!("No virtual environments found under {}", root.display());
        return Ok(());
    }

    for venv in &venvs {
        println!("{}", render_venv(&root, venv, &settings, &cache));
    }
    Ok(())
}

/// Collect every venv root under `root`. Venv interiors are not descended
/// into; their thousands of site-packages entries cannot contain another
/// workspace venv worth reporting.
pub(crate) fn scan_tree(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else { continue };
        if entry.file_type().is_dir() && detector::is_venv_root(entry.path()) {
            found.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }
    found
}

/// One output line for a venv: its label plus the decoration, when the
/// venv has usable metadata.
pub(crate) fn render_venv(
    root: &Path,
    venv: &Path,
    settings: &Settings,
    cache: &VenvInfoCache,
) -> String {
    let label = venv_label(root, venv);
    let decoration = detector::find_pyvenv_cfg(venv)
        .and_then(|cfg| cache.get(&cfg))
        .map(|info| settings.format_decoration(&info))
        .unwrap_or_default();

    if decoration.is_empty() {
        label
    } else {
        format!("{}{}", label.bold(), decoration.dimmed())
    }
}

fn venv_label(root: &Path, venv: &Path) -> String {
    match venv.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
        _ => venv
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| venv.display().to_string()),
    }
}
