//! List registered interpreters

use colored::Colorize;

use crate::common::GlobalOpts;
use venvman_core::registry::InterpreterRegistry;

pub fn handle_interpreters(_opts: &GlobalOpts) -> Result<(), String> {
    let registry = InterpreterRegistry::load().map_err(|e| e.to_string())?;

    println!("{}", "Registered interpreters:".bold().green());
    if registry.interpreters.is_empty() {
        println!("  {}", "(none)".yellow());
        return Ok(());
    }

    for interpreter in &registry.interpreters {
        println!(
            "  {} [{}] {}",
            interpreter.name.cyan(),
            interpreter.kind,
            interpreter.home.display()
        );
    }
    Ok(())
}
