//! Platform-specific path resolution inside Python virtual environments
//!
//! A directory counts as a venv root when a recognizable interpreter
//! executable lives beneath it. Resolution is probe-only: no result is
//! an answer, not an error.

use std::fs;
use std::path::{Path, PathBuf};

/// The name of the binaries/scripts directory in a Python venv
/// "Scripts" on Windows, "bin" on Unix
#[cfg(windows)]
pub const PYTHON_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const PYTHON_BIN_DIR: &str = "bin";

/// Candidate executable names in a venv
#[cfg(not(windows))]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python3", "python"];
#[cfg(windows)]
const PYTHON_EXE_CANDIDATES: &[&str] = &["python.exe", "python3.exe"];

/// Resolve the Python executable path for a virtual environment.
///
/// # Platform differences
///
/// - **Unix/macOS**: `.venv/bin/python3` or `.venv/bin/python`
/// - **Windows**: `.venv/Scripts/python.exe`
///
/// Returns `None` when `venv_root` is not a directory or holds no
/// recognizable interpreter.
pub fn resolve_python_exe(venv_root: &Path) -> Option<PathBuf> {
    if !venv_root.is_dir() {
        return None;
    }

    let bin_dir = venv_root.join(PYTHON_BIN_DIR);
    if !bin_dir.is_dir() {
        return None;
    }

    // Try standard executable names first
    for exe in PYTHON_EXE_CANDIDATES {
        let candidate = bin_dir.join(exe);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    // Fallback: search for any python-like executable
    fs::read_dir(&bin_dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.contains("python"))
                && path.is_file()
        })
}

/// Whether `path` lives inside a virtual environment.
///
/// True when any ancestor directory resolves an interpreter executable.
/// Used to enable bind actions on files that belong to a venv, e.g.
/// `.venv/bin/activate`.
pub fn is_virtual_env(path: &Path) -> bool {
    path.ancestors()
        .skip(1)
        .any(|ancestor| resolve_python_exe(ancestor).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_mock_venv(exe_name: &str) -> TempDir {
        let temp_dir = TempDir::new().expect("temp dir");
        let bin_dir = temp_dir.path().join(PYTHON_BIN_DIR);
        fs::create_dir_all(&bin_dir).expect("bin dir");
        fs::write(bin_dir.join(exe_name), "").expect("exe");
        temp_dir
    }

    #[test]
    #[cfg(not(windows))]
    fn test_resolve_python_exe() {
        let venv = create_mock_venv("python3");
        let exe = resolve_python_exe(venv.path());
        assert!(exe.is_some_and(|p| p.ends_with("bin/python3")));
    }

    #[test]
    #[cfg(not(windows))]
    fn test_resolve_python_exe_fallback_name() {
        let venv = create_mock_venv("python3.12");
        let exe = resolve_python_exe(venv.path());
        assert!(exe.is_some_and(|p| p.ends_with("bin/python3.12")));
    }

    #[test]
    fn test_resolve_python_exe_missing_bin_dir() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(resolve_python_exe(temp_dir.path()), None);
    }

    #[test]
    fn test_resolve_python_exe_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("plain.txt");
        fs::write(&file, "").unwrap();
        assert_eq!(resolve_python_exe(&file), None);
    }

    #[test]
    fn test_is_virtual_env_for_nested_file() {
        let venv = create_mock_venv(PYTHON_EXE_CANDIDATES[0]);
        let nested = venv.path().join(PYTHON_BIN_DIR).join("activate");
        fs::write(&nested, "").unwrap();
        assert!(is_virtual_env(&nested));
    }

    #[test]
    fn test_is_virtual_env_outside_venv() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("main.py");
        fs::write(&file, "").unwrap();
        assert!(!is_virtual_env(&file));
    }
}
