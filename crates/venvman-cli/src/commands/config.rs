//! The settings surface: show, set, and locate the config file

use clap::Subcommand;
use colored::Colorize;

use crate::common::GlobalOpts;
use venvman_config::Settings;
use venvman_logger as logger;

const SUPPORTED_KEYS: &str =
    "prefix, suffix, separator, fields, dismissed-python-warning";

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    Show,
    Set {
        key: String,
        value: String,
    },
    /// Get or set the path to the settings file.
    /// If `new_path` is provided, the CLI will set the config path to that value.
    /// If omitted, the CLI will print the current configuration file path.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: Option<ConfigAction>, _opts: GlobalOpts) {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => match Settings::load() {
            Ok(settings) => {
                println!("{}", "Configuration:".bold().green());
                for (key, value) in settings.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
            Err(e) => {
                logger::error(&format!("Failed to load settings: {}", e));
            }
        },
        ConfigAction::Set { key, value } => match Settings::load() {
            Ok(mut settings) => {
                if settings.set(&key, value.clone()) {
                    match settings.save() {
                        Ok(()) => {
                            logger::success(&format!("Set {} = {}", key, value));
                        }
                        Err(e) => {
                            logger::error(&format!("Failed to save settings: {}", e));
                        }
                    }
                } else {
                    logger::error(&format!(
                        "Unknown config key: {}. Currently supported keys: {}",
                        key, SUPPORTED_KEYS
                    ));
                }
            }
            Err(e) => {
                logger::error(&format!("Failed to load settings: {}", e));
            }
        },
        ConfigAction::Path { new_path } => {
            let config_path = match Settings::path() {
                Ok(path) => path,
                Err(e) => {
                    logger::error(&format!("Failed to resolve config path: {}", e));
                    return;
                }
            };
            logger::debug(&format!("Reading settings from: {}", config_path.display()));

            match new_path {
                Some(p) => {
                    // Pointer file next to the default config, named `.venvman_config_path`
                    let pointer_path = config_path
                        .parent()
                        .unwrap_or_else(|| std::path::Path::new("."))
                        .join(".venvman_config_path");

                    if let Some(parent) = pointer_path.parent() {
                        if let Err(e) = std::fs::create_dir_all(parent) {
                            logger::error(&format!("Failed to set config path: {}", e));
                            return;
                        }
                    }

                    if let Err(e) = std::fs::write(&pointer_path, p.as_bytes()) {
                        logger::error(&format!("Failed to set config path: {}", e));
                        return;
                    }

                    logger::success(&format!("Config path set to {}", p));
                }
                None => {
                    println!("{}", config_path.display());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_opts() -> GlobalOpts {
        GlobalOpts {
            quiet: false,
            verbose: 0,
        }
    }

    #[test]
    fn test_config_show() {
        handle_config(Some(ConfigAction::Show), normal_opts());
    }

    #[test]
    fn test_config_defaults_to_show() {
        handle_config(None, normal_opts());
    }
}
