//! On-disk registry of known Python interpreters
//!
//! The CLI counterpart of an IDE's interpreter table: a TOML file in the
//! user config dir listing every interpreter venvman has registered,
//! keyed by home path (the interpreter executable).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pyvenv_cfg::VenvInfo;

/// Registry kind recorded for interpreters found inside a venv
pub const KIND_VIRTUALENV: &str = "virtualenv";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read interpreter registry: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to write interpreter registry: {0}")]
    Write(#[source] std::io::Error),

    #[error("Failed to parse interpreter registry: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize interpreter registry: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// A single registered interpreter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    /// Display name, e.g. "Python 3.11.0 (ve)"
    pub name: String,
    /// Path to the interpreter executable
    pub home: PathBuf,
    /// Interpreter kind, e.g. "virtualenv"
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct InterpreterRegistry {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default)]
    pub interpreters: Vec<Interpreter>,
}

impl InterpreterRegistry {
    /// Resolve the registry file location.
    ///
    /// Honors an explicit override via VENVMAN_REGISTRY for tests and
    /// isolated runs; otherwise lives next to the venvman config.
    pub fn registry_path() -> Result<PathBuf, RegistryError> {
        if let Ok(env_path) = std::env::var("VENVMAN_REGISTRY") {
            let trimmed = env_path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        #[cfg(not(target_os = "windows"))]
        let base = dirs::home_dir()
            .ok_or(RegistryError::NoConfigDir)?
            .join(".config");

        #[cfg(target_os = "windows")]
        let base = dirs::config_dir().ok_or(RegistryError::NoConfigDir)?;

        Ok(base.join("venvman").join("interpreters.toml"))
    }

    /// Load the registry, returning an empty one when the file does not
    /// exist yet.
    pub fn load() -> Result<Self, RegistryError> {
        Self::load_from(Self::registry_path()?)
    }

    /// Load from an explicit path; used by tests and embedders.
    pub fn load_from(path: PathBuf) -> Result<Self, RegistryError> {
        let mut registry = if path.exists() {
            let content = fs::read_to_string(&path).map_err(RegistryError::Read)?;
            toml::from_str::<InterpreterRegistry>(&content)?
        } else {
            InterpreterRegistry::default()
        };
        registry.path = path;
        Ok(registry)
    }

    pub fn save(&self) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RegistryError::Write)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&self.path, content).map_err(RegistryError::Write)
    }

    /// Find a registered interpreter by its home path.
    pub fn find_by_home(&self, home: &Path) -> Option<&Interpreter> {
        self.interpreters.iter().find(|interp| interp.home == home)
    }

    /// Register a new interpreter, deriving a display name from the venv
    /// metadata and the venv directory name. Does not persist; callers
    /// save once the surrounding operation is committed.
    pub fn register(&mut self, home: PathBuf, info: Option<&VenvInfo>) -> Interpreter {
        let interpreter = Interpreter {
            name: display_name(&home, info),
            home,
            kind: KIND_VIRTUALENV.to_string(),
            version: info.map(|i| i.version.clone()),
            implementation: info.and_then(|i| i.implementation.clone()),
        };
        self.interpreters.push(interpreter.clone());
        interpreter
    }
}

/// Derive a human-readable name like "Python 3.11.0 (ve)".
///
/// The venv directory is the grandparent of the executable
/// (`<venv>/bin/python3`).
fn display_name(home: &Path, info: Option<&VenvInfo>) -> String {
    let venv_name = home
        .parent()
        .and_then(Path::parent)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned());

    match (info.map(|i| i.version.as_str()), venv_name) {
        (Some(version), Some(venv)) => format!("Python {} ({})", version, venv),
        (Some(version), None) => format!("Python {}", version),
        (None, Some(venv)) => format!("Python ({})", venv),
        (None, None) => "Python".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_info() -> VenvInfo {
        VenvInfo {
            version: "3.11.0".to_string(),
            implementation: Some("CPython".to_string()),
            include_system_site_packages: false,
            creator: None,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let registry =
            InterpreterRegistry::load_from(dir.path().join("interpreters.toml")).unwrap();
        assert!(registry.interpreters.is_empty());
    }

    #[test]
    fn test_register_derives_name() {
        let dir = TempDir::new().unwrap();
        let mut registry =
            InterpreterRegistry::load_from(dir.path().join("interpreters.toml")).unwrap();

        let home = PathBuf::from("/work/demo/ve/bin/python3");
        let info = sample_info();
        let interpreter = registry.register(home.clone(), Some(&info));

        assert_eq!(interpreter.name, "Python 3.11.0 (ve)");
        assert_eq!(interpreter.kind, KIND_VIRTUALENV);
        assert_eq!(registry.find_by_home(&home), Some(&interpreter));
    }

    #[test]
    fn test_register_without_info() {
        let dir = TempDir::new().unwrap();
        let mut registry =
            InterpreterRegistry::load_from(dir.path().join("interpreters.toml")).unwrap();

        let interpreter =
            registry.register(PathBuf::from("/work/demo/ve/bin/python3"), None);
        assert_eq!(interpreter.name, "Python (ve)");
        assert_eq!(interpreter.version, None);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("interpreters.toml");

        let mut registry = InterpreterRegistry::load_from(path.clone()).unwrap();
        registry.register(PathBuf::from("/work/demo/ve/bin/python3"), Some(&sample_info()));
        registry.save().unwrap();

        let restored = InterpreterRegistry::load_from(path).unwrap();
        assert_eq!(restored.interpreters.len(), 1);
        assert_eq!(
            restored
                .find_by_home(Path::new("/work/demo/ve/bin/python3"))
                .map(|i| i.name.as_str()),
            Some("Python 3.11.0 (ve)")
        );
    }

    #[test]
    fn test_find_by_home_misses_other_paths() {
        let dir = TempDir::new().unwrap();
        let mut registry =
            InterpreterRegistry::load_from(dir.path().join("interpreters.toml")).unwrap();
        registry.register(PathBuf::from("/a/ve/bin/python3"), None);

        assert!(registry.find_by_home(Path::new("/b/ve/bin/python3")).is_none());
    }
}
