//! Interpreter binding for projects and modules
//!
//! The two user-facing actions: take a selected file or directory, resolve
//! (or register) the interpreter of the venv it points at, then record the
//! binding in the project manifest. Project scope binds the whole project;
//! module scope binds only the module that owns the selection.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pyvenv_cfg;
use crate::registry::{Interpreter, InterpreterRegistry, RegistryError};
use crate::{detector, venv_paths};
use venvman_logger as logger;

/// File name of the per-project manifest recording interpreter bindings
pub const PROJECT_MANIFEST: &str = ".venvman.toml";

/// Execution kind reported in bind notifications; every interpreter
/// venvman touches runs locally.
pub const EXECUTION_KIND: &str = "local";

#[derive(Error, Debug)]
pub enum BindError {
    #[error("No Python executable found in {0}")]
    NoInterpreter(String),

    #[error("Failed to register interpreter from {path}: {source}")]
    Registration {
        path: String,
        #[source]
        source: RegistryError,
    },

    #[error("No module found for {0}")]
    NoModule(String),

    #[error("Failed to update project manifest: {0}")]
    ManifestIo(#[from] std::io::Error),

    #[error("Failed to parse project manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("Failed to serialize project manifest: {0}")]
    ManifestSerialize(#[from] toml::ser::Error),
}

/// Where a resolved interpreter gets attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindScope {
    Project,
    Module,
}

/// Successful bind, naming what received the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOutcome {
    /// Human-readable target, e.g. "project demo" or "module api"
    pub target: String,
    pub interpreter: Interpreter,
}

/// Per-project manifest (`.venvman.toml`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectManifest {
    /// Project-wide interpreter executable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, ModuleEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ModuleEntry {
    /// Module directory, relative to the project root
    pub path: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<PathBuf>,
}

impl ProjectManifest {
    pub fn load(project_root: &Path) -> Result<Self, BindError> {
        let path = project_root.join(PROJECT_MANIFEST);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(ProjectManifest::default())
        }
    }

    pub fn save(&self, project_root: &Path) -> Result<(), BindError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(project_root.join(PROJECT_MANIFEST), content)?;
        Ok(())
    }
}

/// Whether the bind actions apply to `path`: a directory containing a
/// recognizable interpreter, or a file that is itself part of a venv.
pub fn is_bind_candidate(path: &Path) -> bool {
    if path.is_dir() {
        venv_paths::resolve_python_exe(path).is_some()
    } else {
        venv_paths::is_virtual_env(path)
    }
}

/// Bind the interpreter of the venv at (or containing) `selection`.
///
/// One-shot: any failure aborts the whole action and nothing is retried.
/// A newly registered interpreter is persisted before the binding is
/// written.
pub fn bind(
    selection: &Path,
    scope: BindScope,
    registry: &mut InterpreterRegistry,
) -> Result<BindOutcome, BindError> {
    let candidate_root = if selection.is_dir() {
        selection
    } else {
        selection.parent().unwrap_or(selection)
    };

    let exe = venv_paths::resolve_python_exe(candidate_root)
        .ok_or_else(|| BindError::NoInterpreter(display_name(selection)))?;

    let interpreter = resolve_or_register(registry, exe, candidate_root)?;

    let project_root = find_project_root(candidate_root);
    let target = match scope {
        BindScope::Project => bind_project(&project_root, &interpreter)?,
        BindScope::Module => bind_module(&project_root, selection, &interpreter)?,
    };

    logger::debug(&format!("Bound {} to {}", interpreter.name, target));
    Ok(BindOutcome {
        target,
        interpreter,
    })
}

fn resolve_or_register(
    registry: &mut InterpreterRegistry,
    exe: PathBuf,
    venv_root: &Path,
) -> Result<Interpreter, BindError> {
    if let Some(found) = registry.find_by_home(&exe) {
        return Ok(found.clone());
    }

    let info = detector::find_pyvenv_cfg(venv_root)
        .and_then(|cfg| pyvenv_cfg::parse_pyvenv_cfg(&cfg));
    let exe_display = exe.display().to_string();
    let created = registry.register(exe, info.as_ref());
    registry.save().map_err(|source| BindError::Registration {
        path: exe_display,
        source,
    })?;
    Ok(created)
}

/// Nearest ancestor holding a project manifest; falls back to the venv's
/// parent directory, so binding `demo/ve` targets `demo`.
fn find_project_root(candidate_root: &Path) -> PathBuf {
    candidate_root
        .ancestors()
        .find(|ancestor| ancestor.join(PROJECT_MANIFEST).is_file())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| {
            candidate_root
                .parent()
                .unwrap_or(candidate_root)
                .to_path_buf()
        })
}

fn bind_project(project_root: &Path, interpreter: &Interpreter) -> Result<String, BindError> {
    let mut manifest = ProjectManifest::load(project_root)?;
    manifest.interpreter = Some(interpreter.home.clone());
    manifest.save(project_root)?;
    Ok(format!("project {}", display_name(project_root)))
}

fn bind_module(
    project_root: &Path,
    selection: &Path,
    interpreter: &Interpreter,
) -> Result<String, BindError> {
    let mut manifest = ProjectManifest::load(project_root)?;

    // Longest-path containment decides which module owns the selection.
    let owner = manifest
        .modules
        .iter_mut()
        .filter(|(_, entry)| selection.starts_with(project_root.join(&entry.path)))
        .max_by_key(|(_, entry)| entry.path.components().count());

    let Some((name, entry)) = owner else {
        return Err(BindError::NoModule(display_name(selection)));
    };

    entry.interpreter = Some(interpreter.home.clone());
    let name = name.clone();
    manifest.save(project_root)?;
    Ok(format!("module {}", name))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
