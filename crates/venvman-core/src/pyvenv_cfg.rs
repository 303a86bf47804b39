//! Parser for the `pyvenv.cfg` metadata file
//!
//! Every virtual environment carries a small INI-style file at its root,
//! one `key = value` per line, describing the Python version, the
//! implementation, the creating tool, and whether system site-packages
//! are inherited. The parser is deliberately forgiving: unreadable files
//! and files without a version yield `None`, never an error.

use std::fs;
use std::path::Path;

/// File name that marks a virtual-environment root
pub const PYVENV_CFG: &str = "pyvenv.cfg";

/// Metadata parsed from a `pyvenv.cfg` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvInfo {
    /// Python version, e.g. "3.11.5"
    pub version: String,
    /// Implementation name, e.g. "CPython" or "PyPy"
    pub implementation: Option<String>,
    /// Whether the venv inherits the system site-packages
    pub include_system_site_packages: bool,
    /// Creating tool, e.g. "uv@0.9.21" or "virtualenv@20.25.0"
    pub creator: Option<String>,
}

/// Parse a `pyvenv.cfg` file into a [`VenvInfo`].
///
/// Returns `None` when the file cannot be read or contains neither a
/// `version` nor a `version_info` key.
pub fn parse_pyvenv_cfg(path: &Path) -> Option<VenvInfo> {
    let content = fs::read_to_string(path).ok()?;
    parse_content(&content)
}

fn parse_content(content: &str) -> Option<VenvInfo> {
    let mut entries: Vec<(&str, &str)> = Vec::new();
    for line in content.lines() {
        let line = line.trim_start();
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if !key.is_empty() {
                entries.push((key, value.trim()));
            }
        }
    }

    // Last occurrence of a key wins.
    let lookup = |key: &str| {
        entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    };

    let version = lookup("version").or_else(|| lookup("version_info"))?;

    let creator = lookup("uv")
        .map(|v| format!("uv@{v}"))
        .or_else(|| lookup("virtualenv").map(|v| format!("virtualenv@{v}")));

    Some(VenvInfo {
        version: version.to_string(),
        implementation: lookup("implementation").map(str::to_string),
        include_system_site_packages: lookup("include-system-site-packages")
            .is_some_and(|v| v.eq_ignore_ascii_case("true")),
        creator,
    })
}
