//! Show interpreter metadata for one virtual environment

use std::path::Path;

use colored::Colorize;

use crate::common::GlobalOpts;
use venvman_core::{detector, pyvenv_cfg, venv_paths};

pub fn handle_info(path: &Path, _opts: &GlobalOpts) -> Result<(), String> {
    // A file selection means its venv; use the parent directory.
    let venv_root = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };

    let exe = venv_paths::resolve_python_exe(venv_root)
        .ok_or_else(|| format!("No Python executable found in {}", display_name(path)))?;

    let cfg = detector::find_pyvenv_cfg(venv_root)
        .ok_or_else(|| format!("No pyvenv.cfg found in {}", display_name(venv_root)))?;

    let info = pyvenv_cfg::parse_pyvenv_cfg(&cfg)
        .ok_or_else(|| format!("No usable metadata in {}", cfg.display()))?;

    println!("{} {}", "Executable:".cyan(), exe.display());
    println!("{} {}", "Version:".cyan(), info.version);
    if let Some(implementation) = &info.implementation {
        println!("{} {}", "Implementation:".cyan(), implementation);
    }
    println!(
        "{} {}",
        "System site-packages:".cyan(),
        info.include_system_site_packages
    );
    if let Some(creator) = &info.creator {
        println!("{} {}", "Creator:".cyan(), creator);
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
