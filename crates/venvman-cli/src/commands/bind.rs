//! Bind a venv's interpreter to a project or module
//!
//! The CLI form of the two context-menu actions. The action is refused up
//! front when the selection is neither a venv directory nor a file inside
//! one, mirroring action enablement.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::GlobalOpts;
use venvman_core::binding::{self, BindScope, EXECUTION_KIND};
use venvman_core::registry::InterpreterRegistry;
use venvman_logger as logger;

#[derive(Subcommand, Debug, Clone)]
pub enum BindAction {
    /// Set the venv's interpreter as the project interpreter
    Project { path: PathBuf },
    /// Set the venv's interpreter for the module owning the path
    Module { path: PathBuf },
}

pub fn handle_bind(action: BindAction, _opts: &GlobalOpts) -> Result<(), String> {
    let (path, scope) = match action {
        BindAction::Project { path } => (path, BindScope::Project),
        BindAction::Module { path } => (path, BindScope::Module),
    };

    if !binding::is_bind_candidate(&path) {
        return Err(format!(
            "{} is not part of a Python virtual environment",
            path.display()
        ));
    }

    let mut registry = InterpreterRegistry::load().map_err(|e| e.to_string())?;
    let outcome = binding::bind(&path, scope, &mut registry).map_err(|e| e.to_string())?;

    logger::success(&format!(
        "Updated interpreter for {} to:\n{} of type {} {}",
        outcome.target, outcome.interpreter.name, outcome.interpreter.kind, EXECUTION_KIND
    ));
    Ok(())
}
