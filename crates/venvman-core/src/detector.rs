//! Virtual-environment root detection

use std::path::{Path, PathBuf};

use crate::pyvenv_cfg::PYVENV_CFG;
use crate::venv_paths;

/// Whether `path` is a directory holding a recognizable interpreter.
pub fn is_venv_root(path: &Path) -> bool {
    path.is_dir() && venv_paths::resolve_python_exe(path).is_some()
}

/// Locate the `pyvenv.cfg` of a virtual-environment root.
///
/// Accepts only directories. A directory qualifies when an interpreter
/// executable resolves beneath it; the config path is returned only when
/// the `pyvenv.cfg` child actually exists. No side effects.
pub fn find_pyvenv_cfg(path: &Path) -> Option<PathBuf> {
    if !path.is_dir() {
        return None;
    }
    venv_paths::resolve_python_exe(path)?;
    let cfg = path.join(PYVENV_CFG);
    cfg.is_file().then_some(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_mock_venv(with_cfg: bool) -> TempDir {
        let temp_dir = TempDir::new().expect("temp dir");
        let bin_dir = temp_dir.path().join(venv_paths::PYTHON_BIN_DIR);
        fs::create_dir_all(&bin_dir).expect("bin dir");
        #[cfg(not(windows))]
        fs::write(bin_dir.join("python3"), "").expect("exe");
        #[cfg(windows)]
        fs::write(bin_dir.join("python.exe"), "").expect("exe");
        if with_cfg {
            fs::write(temp_dir.path().join(PYVENV_CFG), "version = 3.11.0\n").expect("cfg");
        }
        temp_dir
    }

    #[test]
    fn test_find_pyvenv_cfg() {
        let venv = create_mock_venv(true);
        let cfg = find_pyvenv_cfg(venv.path());
        assert!(cfg.is_some_and(|p| p.ends_with(PYVENV_CFG)));
    }

    #[test]
    fn test_find_pyvenv_cfg_without_cfg_file() {
        let venv = create_mock_venv(false);
        assert_eq!(find_pyvenv_cfg(venv.path()), None);
    }

    #[test]
    fn test_find_pyvenv_cfg_without_interpreter() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(PYVENV_CFG), "version = 3.11.0\n").unwrap();
        assert_eq!(find_pyvenv_cfg(temp_dir.path()), None);
    }

    #[test]
    fn test_find_pyvenv_cfg_rejects_files() {
        let venv = create_mock_venv(true);
        let cfg_path = venv.path().join(PYVENV_CFG);
        assert_eq!(find_pyvenv_cfg(&cfg_path), None);
    }

    #[test]
    fn test_is_venv_root() {
        let venv = create_mock_venv(false);
        assert!(is_venv_root(venv.path()));

        let plain = TempDir::new().unwrap();
        assert!(!is_venv_root(plain.path()));
    }
}
