//! Decoration formatting for venv metadata
//!
//! Renders a [`VenvInfo`] into the display string appended after a venv's
//! directory name, e.g. `" [3.11.0 - CPython]"`. Which fields appear, and
//! in which order, is user-configurable.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::pyvenv_cfg::VenvInfo;

/// A single toggleable piece of the decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationField {
    Version,
    Implementation,
    System,
    Creator,
}

impl DecorationField {
    /// Every field, in default display order.
    pub const ALL: [DecorationField; 4] = [
        DecorationField::Version,
        DecorationField::Implementation,
        DecorationField::System,
        DecorationField::Creator,
    ];

    /// Symbolic name used in persisted settings.
    pub fn name(self) -> &'static str {
        match self {
            DecorationField::Version => "VERSION",
            DecorationField::Implementation => "IMPLEMENTATION",
            DecorationField::System => "SYSTEM",
            DecorationField::Creator => "CREATOR",
        }
    }
}

impl fmt::Display for DecorationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown decoration field: {0}")]
pub struct UnknownFieldError(String);

impl FromStr for DecorationField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VERSION" => Ok(DecorationField::Version),
            "IMPLEMENTATION" => Ok(DecorationField::Implementation),
            "SYSTEM" => Ok(DecorationField::System),
            "CREATOR" => Ok(DecorationField::Creator),
            other => Err(UnknownFieldError(other.to_string())),
        }
    }
}

/// Render the decoration for `info`.
///
/// Enabled fields resolve in order; fields without a value are omitted.
/// An empty value list yields the empty string, otherwise the joined
/// values are wrapped with `prefix` and `suffix`. Pure function.
pub fn format_decoration(
    info: &VenvInfo,
    fields: &[DecorationField],
    prefix: &str,
    suffix: &str,
    separator: &str,
) -> String {
    let values: Vec<&str> = fields
        .iter()
        .filter_map(|field| match field {
            DecorationField::Version => Some(info.version.as_str()),
            DecorationField::Implementation => info.implementation.as_deref(),
            DecorationField::System => info.include_system_site_packages.then_some("SYSTEM"),
            // Tolerate creator values carrying a leading separator.
            DecorationField::Creator => info
                .creator
                .as_deref()
                .map(|creator| creator.strip_prefix(separator).unwrap_or(creator)),
        })
        .collect();

    if values.is_empty() {
        String::new()
    } else {
        format!("{prefix}{}{suffix}", values.join(separator))
    }
}
