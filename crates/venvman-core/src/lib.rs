//! Core library for venvman
//!
//! Detects Python virtual environments in a directory tree, parses their
//! `pyvenv.cfg` metadata, memoizes the results behind a file-event-aware
//! cache, and binds a venv's interpreter to a project or module manifest.

pub mod binding;
pub mod cache;
pub mod decoration;
pub mod detector;
pub mod pyvenv_cfg;
pub mod registry;
pub mod venv_paths;
pub mod watch;
