//! Startup environment check
//!
//! venvman is only useful alongside a Python installation. Warn once per
//! run when none is on PATH, unless the user has dismissed the warning.

use which::which;

use venvman_config::Settings;
use venvman_logger as logger;

pub fn warn_if_python_missing() {
    let settings = Settings::load().unwrap_or_default();
    if settings.dismissed_python_warning {
        return;
    }
    if which("python3").is_ok() || which("python").is_ok() {
        return;
    }
    logger::warn(
        "No Python interpreter found on PATH. Install Python for full functionality, or run `venvman config set dismissed-python-warning true` to silence this warning.",
    );
}
