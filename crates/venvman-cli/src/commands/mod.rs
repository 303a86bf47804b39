//! Command implementations for the venvman CLI

pub mod bind;
pub mod config;
pub mod info;
pub mod interpreters;
pub mod scan;
pub mod watch;
