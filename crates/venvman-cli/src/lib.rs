//! venvman library - expose modules for testing
//!
//! This library exposes the command implementations needed for testing
//! and integration.

pub mod commands;
pub mod common;
pub mod startup;
